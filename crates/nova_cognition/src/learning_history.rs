//! 学习历史统计
//!
//! 独立的交互统计工具：累积标量观测，计算均值/标准差，
//! 用变异系数判定交互是否稳定。

use nova_core::{NovaError, Result};

/// 学习历史
#[derive(Debug, Clone)]
pub struct LearningHistory {
    /// 统计计算所需最少样本数 (至少 5)
    min_samples: usize,
    /// 稳定性阈值 (变异系数低于此值视为稳定)
    volatility_threshold: f64,
    /// 观测历史
    history: Vec<f64>,
}

impl LearningHistory {
    /// 创建学习历史
    ///
    /// min_samples 低于 5 时统计结果不可靠，直接拒绝。
    pub fn new(min_samples: usize, volatility_threshold: f64) -> Result<Self> {
        if min_samples < 5 {
            return Err(NovaError::History(
                "min_samples must be at least 5 for reliable statistical calculations".to_string(),
            ));
        }

        Ok(Self {
            min_samples,
            volatility_threshold,
            history: Vec::new(),
        })
    }

    /// 创建默认历史 (min_samples=5, 阈值 0.3)
    pub fn default_history() -> Self {
        Self::new(5, 0.3).expect("default parameters are valid")
    }

    /// 记录一个观测值
    pub fn record(&mut self, value: f64) {
        self.history.push(value);
    }

    /// 计算均值与标准差
    ///
    /// 样本不足时返回 None。
    pub fn statistics(&self) -> Option<(f64, f64)> {
        if self.history.len() < self.min_samples {
            return None;
        }

        let n = self.history.len() as f64;
        let mean = self.history.iter().sum::<f64>() / n;
        let variance = self.history.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some((mean, variance.sqrt()))
    }

    /// 交互是否稳定
    ///
    /// 变异系数 (标准差/均值) 低于阈值且样本充足时为稳定。
    pub fn is_stable(&self) -> bool {
        let Some((mean, std_dev)) = self.statistics() else {
            return false;
        };

        if mean.abs() < f64::EPSILON {
            return false;
        }

        let volatility = std_dev / mean;
        volatility < self.volatility_threshold
    }

    /// 样本数
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_samples_enforced() {
        assert!(LearningHistory::new(4, 0.3).is_err());
        assert!(LearningHistory::new(5, 0.3).is_ok());
    }

    #[test]
    fn test_statistics_require_min_samples() {
        let mut history = LearningHistory::default_history();
        for _ in 0..4 {
            history.record(1.0);
        }
        assert!(history.statistics().is_none());

        history.record(1.0);
        let (mean, std_dev) = history.statistics().unwrap();
        assert!((mean - 1.0).abs() < 1e-12);
        assert!(std_dev < 1e-12);
    }

    #[test]
    fn test_constant_observations_are_stable() {
        let mut history = LearningHistory::default_history();
        for _ in 0..5 {
            history.record(2.0);
        }
        assert!(history.is_stable());
    }

    #[test]
    fn test_wild_observations_are_volatile() {
        let mut history = LearningHistory::default_history();
        for value in [0.1, 5.0, 0.2, 4.0, 0.3] {
            history.record(value);
        }
        assert!(!history.is_stable());
    }

    #[test]
    fn test_insufficient_samples_never_stable() {
        let history = LearningHistory::default_history();
        assert!(!history.is_stable());
    }
}
