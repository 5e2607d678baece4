//! 反应层 - 即时情绪响应
//!
//! 快思考层 (50-300ms)：维护对情绪信号的预测，
//! 用精度加权的动态学习率最小化预测误差。

use serde::{Deserialize, Serialize};
use tracing::debug;

use nova_core::{LayerKind, SocialSignal};

/// 基础学习率
const BASE_LEARNING_RATE: f64 = 0.3;

/// 反应层处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactiveOutput {
    /// 更新后的情绪状态
    pub emotion: f64,
    /// 预测误差
    pub prediction_error: f64,
    /// 处理耗时 (秒)
    pub response_time: f64,
}

/// 反应层
pub struct ReactiveLayer {
    /// 内部模型预测的情绪状态 (-1 到 1)
    emotional_state: f64,
    /// 注意力分配，用于精度加权 (0 到 1)
    attention_level: f64,
    /// 最近一次预测误差
    prediction_error: f64,
}

impl ReactiveLayer {
    /// 创建反应层，基线情绪为中性
    pub fn new() -> Self {
        Self {
            emotional_state: 0.0,
            attention_level: 1.0,
            prediction_error: 0.0,
        }
    }

    /// 处理社交信号
    ///
    /// 1. 以当前情绪状态为预测
    /// 2. 计算预测误差
    /// 3. 误差越大 (置信度越低)，学习率越高
    /// 4. 用加权误差更新内部模型
    pub async fn process_signal(&mut self, signal: &SocialSignal) -> ReactiveOutput {
        let delay = LayerKind::Reactive.simulated_delay();
        tokio::time::sleep(delay).await;

        let predicted_emotion = self.emotional_state;
        let actual_emotion = signal.value;
        self.prediction_error = actual_emotion - predicted_emotion;

        // 动态学习率：误差大时置信度低，学习更快
        let confidence_factor = (-self.prediction_error.abs()).exp();
        let learning_rate = BASE_LEARNING_RATE * (2.0 - confidence_factor);

        self.emotional_state += learning_rate * self.prediction_error;

        debug!(
            emotion = self.emotional_state,
            error = self.prediction_error,
            learning_rate,
            "reactive layer updated"
        );

        ReactiveOutput {
            emotion: self.emotional_state,
            prediction_error: self.prediction_error,
            response_time: delay.as_secs_f64(),
        }
    }

    /// 当前情绪状态
    pub fn emotional_state(&self) -> f64 {
        self.emotional_state
    }

    /// 当前注意力水平
    pub fn attention_level(&self) -> f64 {
        self.attention_level
    }

    /// 最近一次预测误差
    pub fn prediction_error(&self) -> f64 {
        self.prediction_error
    }
}

impl Default for ReactiveLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_signal_error_equals_value() {
        let mut layer = ReactiveLayer::new();
        let output = layer.process_signal(&SocialSignal::emotion(0.8)).await;

        // 初始预测为 0，误差即信号值
        assert!((output.prediction_error - 0.8).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_emotion_moves_toward_signal() {
        let mut layer = ReactiveLayer::new();

        let mut last_distance = 1.0;
        for _ in 0..5 {
            let output = layer.process_signal(&SocialSignal::emotion(1.0)).await;
            let distance = (1.0 - output.emotion).abs();
            assert!(distance < last_distance);
            last_distance = distance;
        }
    }

    #[tokio::test]
    async fn test_dynamic_learning_rate_bounds() {
        // 学习率在 (base, 2*base) 之间：一步更新不会越过目标
        let mut layer = ReactiveLayer::new();
        let output = layer.process_signal(&SocialSignal::emotion(1.0)).await;

        assert!(output.emotion > BASE_LEARNING_RATE);
        assert!(output.emotion < 2.0 * BASE_LEARNING_RATE);
    }

    #[tokio::test]
    async fn test_response_time_reported() {
        let mut layer = ReactiveLayer::new();
        let output = layer.process_signal(&SocialSignal::emotion(0.1)).await;
        assert!((output.response_time - 0.05).abs() < 1e-12);
    }
}
