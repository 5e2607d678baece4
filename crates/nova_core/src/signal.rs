//! 社交信号定义
//!
//! 认知层级的最底层输入：来自用户交互的感知信号。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 社交信号类别
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalKind {
    /// 情绪信号
    Emotion,
    /// 注意力信号
    Attention,
    /// 手势信号
    Gesture,
    /// 语音信号
    Voice,
    /// 生理信号
    Biosignal,
    /// 自定义
    Custom(String),
}

impl SignalKind {
    /// 类别名称
    pub fn name(&self) -> &str {
        match self {
            SignalKind::Emotion => "emotion",
            SignalKind::Attention => "attention",
            SignalKind::Gesture => "gesture",
            SignalKind::Voice => "voice",
            SignalKind::Biosignal => "biosignal",
            SignalKind::Custom(name) => name,
        }
    }

    /// 从名称解析类别，未知名称归入 Custom
    pub fn from_name(name: &str) -> Self {
        match name {
            "emotion" => SignalKind::Emotion,
            "attention" => SignalKind::Attention,
            "gesture" => SignalKind::Gesture,
            "voice" => SignalKind::Voice,
            "biosignal" => SignalKind::Biosignal,
            other => SignalKind::Custom(other.to_string()),
        }
    }
}

/// 社交信号
///
/// 信号强度归一化到 [-1, 1]，检测置信度归一化到 [0, 1]。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSignal {
    /// 信号唯一标识
    pub id: Uuid,
    /// 信号类别
    pub kind: SignalKind,
    /// 归一化信号强度 (-1 到 1)
    pub value: f64,
    /// 检测置信度 (0 到 1)
    pub confidence: f64,
    /// 检测时间戳
    pub timestamp: DateTime<Utc>,
}

/// 演示场景中使用的默认检测置信度
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

impl SocialSignal {
    /// 创建新信号，强度与置信度自动钳制到合法区间
    pub fn new(kind: SignalKind, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            value: value.clamp(-1.0, 1.0),
            confidence: DEFAULT_CONFIDENCE,
            timestamp: Utc::now(),
        }
    }

    /// 创建情绪信号
    pub fn emotion(value: f64) -> Self {
        Self::new(SignalKind::Emotion, value)
    }

    /// 设置置信度
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_value_clamped() {
        let signal = SocialSignal::emotion(1.5);
        assert_eq!(signal.value, 1.0);

        let signal = SocialSignal::emotion(-2.0);
        assert_eq!(signal.value, -1.0);
    }

    #[test]
    fn test_signal_confidence_clamped() {
        let signal = SocialSignal::emotion(0.5).with_confidence(1.2);
        assert_eq!(signal.confidence, 1.0);
    }

    #[test]
    fn test_default_confidence() {
        let signal = SocialSignal::new(SignalKind::Attention, 0.3);
        assert_eq!(signal.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(SignalKind::Emotion.name(), "emotion");
        assert_eq!(SignalKind::Custom("gaze".to_string()).name(), "gaze");
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(SignalKind::from_name("emotion"), SignalKind::Emotion);
        assert_eq!(
            SignalKind::from_name("gaze"),
            SignalKind::Custom("gaze".to_string())
        );
    }
}
