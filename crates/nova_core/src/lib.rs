//! # nova_core - NOVA Core Primitives
//!
//! 核心原语层，定义社交信号、认知层级时标、全局错误处理机制。
//! 此 crate 是整个项目的基础依赖，不依赖其他业务 crate。

pub mod error;
pub mod layer;
pub mod signal;

pub use error::{NovaError, Result};
pub use layer::LayerKind;
pub use signal::{SignalKind, SocialSignal};
