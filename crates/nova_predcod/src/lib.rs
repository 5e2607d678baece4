//! # nova_predcod - NOVA Predictive Coding
//!
//! 层级预测编码网络：每层维护对输入的预测，只向上传递预测误差。
//! 低层学习率高、快速适应短期模式；高层学习率低、提取稳定的底层规律。

pub mod network;
pub mod node;
pub mod pattern;

pub use network::{NetworkConfig, PredictiveNetwork};
pub use node::{NodeUpdate, PredictiveNode};
pub use pattern::PatternGenerator;
