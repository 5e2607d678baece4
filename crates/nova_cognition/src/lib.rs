//! # nova_cognition - NOVA Cognition Engine
//!
//! 三层认知引擎：Reactive (即时情绪) + Responsive (上下文响应) + Reflective (长期适应)。
//! 每层维护自己时标上的预测模型，用精度加权的预测误差更新内部状态。

pub mod learning_history;
pub mod reactive;
pub mod reflective;
pub mod responsive;
pub mod virtual_human;

pub use learning_history::LearningHistory;
pub use reactive::{ReactiveLayer, ReactiveOutput};
pub use reflective::{InteractionRecord, ReflectiveLayer, ReflectiveOutput};
pub use responsive::{ResponsiveLayer, ResponsiveOutput};
pub use virtual_human::{InteractionResult, VirtualHuman};
