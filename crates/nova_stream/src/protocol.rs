//! 流式协议定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nova_core::{LayerKind, SignalKind};

/// 主题名称
pub mod topic {
    /// 用户输入主题
    pub const INPUT: &str = "nova.input";
    /// 反应层输出主题
    pub const REACTIVE_OUTPUT: &str = "nova.reactive.output";
    /// 响应层输出主题
    pub const RESPONSIVE_OUTPUT: &str = "nova.responsive.output";
    /// 反思层输出主题
    pub const REFLECTIVE_OUTPUT: &str = "nova.reflective.output";

    /// 层级对应的输出主题
    pub fn layer_output(layer: super::LayerKind) -> &'static str {
        match layer {
            super::LayerKind::Reactive => REACTIVE_OUTPUT,
            super::LayerKind::Responsive => RESPONSIVE_OUTPUT,
            super::LayerKind::Reflective => REFLECTIVE_OUTPUT,
        }
    }
}

/// 流式消息类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StreamMessageType {
    /// 用户输入
    UserInput,
    /// 反应层响应
    ReactiveResponse,
    /// 响应层响应
    ResponsiveResponse,
    /// 反思层更新
    ReflectiveUpdate,
    /// 错误
    Error,
    /// 自定义
    Custom(String),
}

impl StreamMessageType {
    /// 层级对应的输出消息类型
    pub fn for_layer(layer: LayerKind) -> Self {
        match layer {
            LayerKind::Reactive => StreamMessageType::ReactiveResponse,
            LayerKind::Responsive => StreamMessageType::ResponsiveResponse,
            LayerKind::Reflective => StreamMessageType::ReflectiveUpdate,
        }
    }
}

/// 流式消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamMessage {
    /// 消息 ID
    pub id: Uuid,
    /// 消息类型
    pub msg_type: StreamMessageType,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// 载荷
    pub payload: serde_json::Value,
}

impl StreamMessage {
    /// 创建新消息
    pub fn new(msg_type: StreamMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> nova_core::Result<String> {
        serde_json::to_string(self).map_err(nova_core::NovaError::Serialization)
    }

    /// 从 JSON 反序列化
    pub fn from_json(json: &str) -> nova_core::Result<Self> {
        serde_json::from_str(json).map_err(nova_core::NovaError::Serialization)
    }
}

/// 流式协议处理器
pub struct StreamProtocol;

impl StreamProtocol {
    /// 创建用户输入消息
    pub fn user_input(kind: &SignalKind, value: f64) -> StreamMessage {
        StreamMessage::new(
            StreamMessageType::UserInput,
            serde_json::json!({
                "kind": kind.name(),
                "value": value,
            }),
        )
    }

    /// 创建层级输出消息
    pub fn layer_output(
        layer: LayerKind,
        output: serde_json::Value,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> StreamMessage {
        let duration = (end_time - start_time).num_milliseconds() as f64 / 1000.0;
        StreamMessage::new(
            StreamMessageType::for_layer(layer),
            serde_json::json!({
                "layer": layer.name(),
                "output": output,
                "start_time": start_time,
                "end_time": end_time,
                "processing_duration": duration,
            }),
        )
    }

    /// 创建错误消息
    pub fn error(reason: &str) -> StreamMessage {
        StreamMessage::new(
            StreamMessageType::Error,
            serde_json::json!({ "reason": reason }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_payload() {
        let msg = StreamProtocol::user_input(&SignalKind::Emotion, 0.5);
        assert_eq!(msg.msg_type, StreamMessageType::UserInput);
        assert_eq!(msg.payload["kind"], "emotion");
        assert_eq!(msg.payload["value"], 0.5);
    }

    #[test]
    fn test_json_round_trip() {
        let msg = StreamProtocol::user_input(&SignalKind::Attention, -0.3);
        let json = msg.to_json().unwrap();
        let parsed = StreamMessage::from_json(&json).unwrap();

        assert_eq!(parsed.id, msg.id);
        assert_eq!(parsed.msg_type, msg.msg_type);
    }

    #[test]
    fn test_layer_topics_and_types() {
        assert_eq!(topic::layer_output(LayerKind::Reactive), topic::REACTIVE_OUTPUT);
        assert_eq!(
            StreamMessageType::for_layer(LayerKind::Reflective),
            StreamMessageType::ReflectiveUpdate
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(StreamMessage::from_json("not json").is_err());
    }
}
