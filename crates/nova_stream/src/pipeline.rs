//! 认知流水线
//!
//! 将输入消息解析为社交信号，送入三层认知层级，
//! 再把各层输出并发发布到对应主题。

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info};

use nova_cognition::{InteractionResult, VirtualHuman};
use nova_core::{LayerKind, NovaError, Result, SignalKind, SocialSignal};

use crate::bus::MessageBus;
use crate::protocol::{topic, StreamMessage, StreamMessageType, StreamProtocol};

/// 一次流水线处理的结果
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// 触发消息 ID
    pub input_id: uuid::Uuid,
    /// 认知层级输出
    pub interaction: InteractionResult,
    /// 成功发布的层级数
    pub published_layers: usize,
}

/// 认知流水线
pub struct NovaPipeline {
    /// 虚拟人认知层级
    virtual_human: VirtualHuman,
    /// 消息总线
    bus: MessageBus,
}

impl NovaPipeline {
    /// 创建流水线
    pub fn new(bus: MessageBus) -> Self {
        Self {
            virtual_human: VirtualHuman::new(),
            bus,
        }
    }

    /// 处理一条输入消息
    ///
    /// 各层输出在认知处理完成后并发发布；单层发布失败只记录不终止。
    pub async fn process(&mut self, message: &StreamMessage) -> Result<PipelineResult> {
        if message.msg_type != StreamMessageType::UserInput {
            return Err(NovaError::Protocol(format!(
                "pipeline expects UserInput, got {:?}",
                message.msg_type
            )));
        }

        let signal = Self::signal_from_payload(&message.payload)?;
        let start_time = Utc::now();
        let interaction = self.virtual_human.process_signal(signal).await;

        let outputs = [
            (LayerKind::Reactive, serde_json::to_value(&interaction.reactive)?),
            (LayerKind::Responsive, serde_json::to_value(&interaction.responsive)?),
            (LayerKind::Reflective, serde_json::to_value(&interaction.reflective)?),
        ];

        // 层级串行执行：各层时间窗按模拟延迟依次排开
        let mut cursor = start_time;
        let publishes = outputs.map(|(layer, output)| {
            let delay = chrono::Duration::from_std(layer.simulated_delay())
                .unwrap_or_else(|_| chrono::Duration::zero());
            let layer_start = cursor;
            let layer_end = layer_start + delay;
            cursor = layer_end;

            let bus = self.bus.clone();
            let msg = StreamProtocol::layer_output(layer, output, layer_start, layer_end);
            async move { bus.publish(topic::layer_output(layer), msg).await }
        });

        let [reactive_fut, responsive_fut, reflective_fut] = publishes;
        let receivers = tokio::join!(reactive_fut, responsive_fut, reflective_fut);
        let receivers = [receivers.0, receivers.1, receivers.2];

        let mut published_layers = 0;
        for (layer, receivers) in LayerKind::ALL.iter().zip(receivers) {
            if receivers > 0 {
                published_layers += 1;
            } else {
                error!(layer = layer.name(), "layer output not delivered");
            }
        }

        info!(
            input_id = %message.id,
            published_layers,
            total_processing_time = interaction.total_processing_time,
            "pipeline cycle completed"
        );

        Ok(PipelineResult {
            input_id: message.id,
            interaction,
            published_layers,
        })
    }

    /// 从载荷解析社交信号
    fn signal_from_payload(payload: &Value) -> Result<SocialSignal> {
        let value = payload
            .get("value")
            .and_then(Value::as_f64)
            .ok_or_else(|| NovaError::Protocol("payload missing numeric 'value'".to_string()))?;

        let kind = payload
            .get("kind")
            .and_then(Value::as_str)
            .map(SignalKind::from_name)
            .unwrap_or(SignalKind::Emotion);

        Ok(SocialSignal::new(kind, value))
    }

    /// 已处理的交互数
    pub fn interaction_count(&self) -> usize {
        self.virtual_human.interaction_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_publishes_all_layer_outputs() {
        let bus = MessageBus::new();
        let mut reactive_rx = bus.subscribe(topic::REACTIVE_OUTPUT).await;
        let mut reflective_rx = bus.subscribe(topic::REFLECTIVE_OUTPUT).await;
        let _responsive_rx = bus.subscribe(topic::RESPONSIVE_OUTPUT).await;

        let mut pipeline = NovaPipeline::new(bus);
        let input = StreamProtocol::user_input(&SignalKind::Emotion, 0.5);

        let result = pipeline.process(&input).await.unwrap();
        assert_eq!(result.published_layers, 3);
        assert_eq!(result.input_id, input.id);

        let reactive_msg = reactive_rx.recv().await.unwrap();
        assert_eq!(reactive_msg.msg_type, StreamMessageType::ReactiveResponse);
        assert_eq!(reactive_msg.payload["layer"], "reactive");

        let reflective_msg = reflective_rx.recv().await.unwrap();
        assert_eq!(reflective_msg.msg_type, StreamMessageType::ReflectiveUpdate);
    }

    #[tokio::test]
    async fn test_layer_durations_match_layer_timescales() {
        let bus = MessageBus::new();
        let mut reactive_rx = bus.subscribe(topic::REACTIVE_OUTPUT).await;
        let mut responsive_rx = bus.subscribe(topic::RESPONSIVE_OUTPUT).await;
        let mut reflective_rx = bus.subscribe(topic::REFLECTIVE_OUTPUT).await;

        let mut pipeline = NovaPipeline::new(bus);
        let input = StreamProtocol::user_input(&SignalKind::Emotion, 0.3);
        pipeline.process(&input).await.unwrap();

        // 每层上报自己的处理耗时，而非整轮耗时
        let expected = [
            (reactive_rx.recv().await.unwrap(), 0.05),
            (responsive_rx.recv().await.unwrap(), 0.2),
            (reflective_rx.recv().await.unwrap(), 0.5),
        ];
        for (msg, duration) in expected {
            let reported = msg.payload["processing_duration"].as_f64().unwrap();
            assert!((reported - duration).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_non_input_message_rejected() {
        let bus = MessageBus::new();
        let mut pipeline = NovaPipeline::new(bus);

        let msg = StreamProtocol::error("boom");
        assert!(pipeline.process(&msg).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_value_rejected() {
        let bus = MessageBus::new();
        let mut pipeline = NovaPipeline::new(bus);

        let msg = StreamMessage::new(
            StreamMessageType::UserInput,
            serde_json::json!({ "kind": "emotion" }),
        );
        assert!(pipeline.process(&msg).await.is_err());
    }

    #[tokio::test]
    async fn test_pipeline_accumulates_interactions() {
        let bus = MessageBus::new();
        let mut pipeline = NovaPipeline::new(bus);

        for value in [0.2, 0.8] {
            let input = StreamProtocol::user_input(&SignalKind::Emotion, value);
            pipeline.process(&input).await.unwrap();
        }
        assert_eq!(pipeline.interaction_count(), 2);
    }
}
