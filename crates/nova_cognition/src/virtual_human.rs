//! 虚拟人 - 三层认知集成
//!
//! 将反应层、响应层、反思层串联为完整的预测层级：
//! 信号逐层上行，每层在自己的时标上最小化预测误差。

use serde::{Deserialize, Serialize};
use tracing::info;

use nova_core::{SignalKind, SocialSignal};

use crate::reactive::{ReactiveLayer, ReactiveOutput};
use crate::reflective::{ReflectiveLayer, ReflectiveOutput};
use crate::responsive::{ResponsiveLayer, ResponsiveOutput};

/// 一次交互的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResult {
    /// 输入信号
    pub signal: SocialSignal,
    /// 反应层输出
    pub reactive: ReactiveOutput,
    /// 响应层输出
    pub responsive: ResponsiveOutput,
    /// 反思层输出
    pub reflective: ReflectiveOutput,
    /// 总处理耗时 (秒)
    pub total_processing_time: f64,
}

/// 虚拟人
pub struct VirtualHuman {
    /// 反应层
    reactive: ReactiveLayer,
    /// 响应层
    responsive: ResponsiveLayer,
    /// 反思层
    reflective: ReflectiveLayer,
}

impl VirtualHuman {
    /// 创建虚拟人
    pub fn new() -> Self {
        Self {
            reactive: ReactiveLayer::new(),
            responsive: ResponsiveLayer::new(),
            reflective: ReflectiveLayer::new(),
        }
    }

    /// 处理一次用户交互
    pub async fn process_interaction(
        &mut self,
        kind: SignalKind,
        value: f64,
    ) -> InteractionResult {
        let signal = SocialSignal::new(kind, value);
        self.process_signal(signal).await
    }

    /// 将信号送入三层认知层级
    pub async fn process_signal(&mut self, signal: SocialSignal) -> InteractionResult {
        let reactive = self.reactive.process_signal(&signal).await;
        let responsive = self.responsive.process_context(&signal, &reactive).await;
        let reflective = self
            .reflective
            .analyze_patterns(&signal, &reactive, &responsive)
            .await;

        let total_processing_time = reactive.response_time
            + nova_core::LayerKind::Responsive.simulated_delay().as_secs_f64()
            + nova_core::LayerKind::Reflective.simulated_delay().as_secs_f64();

        info!(
            kind = signal.kind.name(),
            value = signal.value,
            emotion = reactive.emotion,
            total_processing_time,
            "interaction processed"
        );

        InteractionResult {
            signal,
            reactive,
            responsive,
            reflective,
            total_processing_time,
        }
    }

    /// 反应层 (只读)
    pub fn reactive(&self) -> &ReactiveLayer {
        &self.reactive
    }

    /// 反思层累积的交互记录
    pub fn reflective_history(&self) -> &[crate::reflective::InteractionRecord] {
        self.reflective.history()
    }

    /// 反思层累积的交互数
    pub fn interaction_count(&self) -> usize {
        self.reflective.history().len()
    }
}

impl Default for VirtualHuman {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_hierarchy_produces_all_outputs() {
        let mut vh = VirtualHuman::new();
        let result = vh.process_interaction(SignalKind::Emotion, 0.5).await;

        assert!((result.reactive.prediction_error - 0.5).abs() < 1e-12);
        assert!(!result.responsive.response.is_empty());
        assert_eq!(result.reflective.history_length, 1);
    }

    #[tokio::test]
    async fn test_total_processing_time_sums_layers() {
        let mut vh = VirtualHuman::new();
        let result = vh.process_interaction(SignalKind::Emotion, 0.2).await;

        // 0.05 + 0.2 + 0.5
        assert!((result.total_processing_time - 0.75).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_interaction_count_accumulates() {
        let mut vh = VirtualHuman::new();
        for value in [0.2, 0.8, -0.3] {
            vh.process_interaction(SignalKind::Emotion, value).await;
        }
        assert_eq!(vh.interaction_count(), 3);
    }

    #[tokio::test]
    async fn test_reflective_history_exposes_records() {
        let mut vh = VirtualHuman::new();
        vh.process_interaction(SignalKind::Emotion, 0.6).await;
        vh.process_interaction(SignalKind::Emotion, -0.2).await;

        let history = vh.reflective_history();
        assert_eq!(history.len(), 2);
        assert!((history[0].signal.value - 0.6).abs() < 1e-12);
        assert!(!history[1].responsive.response.is_empty());
    }
}
