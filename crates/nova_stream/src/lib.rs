//! # nova_stream - NOVA Stream
//!
//! 流式处理层：主题消息总线、认知流水线、WebSocket 网关。
//! 消息流：Input -> Bus -> [Reactive, Responsive, Reflective] -> Bus -> Output。

pub mod bus;
pub mod pipeline;
pub mod protocol;
pub mod server;

pub use bus::MessageBus;
pub use pipeline::{NovaPipeline, PipelineResult};
pub use protocol::{topic, StreamMessage, StreamMessageType, StreamProtocol};
pub use server::{GatewayConfig, StreamGateway};
