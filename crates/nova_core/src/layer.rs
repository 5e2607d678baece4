//! 认知层级时标定义
//!
//! NOVA 三层架构：Reactive (50-300ms) / Responsive (300-1000ms) / Reflective (>1000ms)。
//! 每层以不同的时间尺度处理同一交互流。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 认知层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// 反应层：即时情绪响应
    Reactive,
    /// 响应层：上下文感知响应
    Responsive,
    /// 反思层：长期模式学习与适应
    Reflective,
}

impl LayerKind {
    /// 全部层级，按时标从快到慢
    pub const ALL: [LayerKind; 3] = [
        LayerKind::Reactive,
        LayerKind::Responsive,
        LayerKind::Reflective,
    ];

    /// 层级名称
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Reactive => "reactive",
            LayerKind::Responsive => "responsive",
            LayerKind::Reflective => "reflective",
        }
    }

    /// 时标窗口下界
    pub fn window_floor(&self) -> Duration {
        match self {
            LayerKind::Reactive => Duration::from_millis(50),
            LayerKind::Responsive => Duration::from_millis(300),
            LayerKind::Reflective => Duration::from_millis(1000),
        }
    }

    /// 时标窗口上界 (反思层无上界)
    pub fn window_ceiling(&self) -> Option<Duration> {
        match self {
            LayerKind::Reactive => Some(Duration::from_millis(300)),
            LayerKind::Responsive => Some(Duration::from_millis(1000)),
            LayerKind::Reflective => None,
        }
    }

    /// 模拟处理延迟
    pub fn simulated_delay(&self) -> Duration {
        match self {
            LayerKind::Reactive => Duration::from_millis(50),
            LayerKind::Responsive => Duration::from_millis(200),
            LayerKind::Reflective => Duration::from_millis(500),
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_ordered_by_timescale() {
        let floors: Vec<Duration> = LayerKind::ALL.iter().map(|l| l.window_floor()).collect();
        assert!(floors[0] < floors[1]);
        assert!(floors[1] < floors[2]);
    }

    #[test]
    fn test_reflective_has_no_ceiling() {
        assert!(LayerKind::Reflective.window_ceiling().is_none());
        assert!(LayerKind::Reactive.window_ceiling().is_some());
    }

    #[test]
    fn test_delay_within_window() {
        let reactive = LayerKind::Reactive;
        assert!(reactive.simulated_delay() >= reactive.window_floor());
    }
}
