//! 反思层 - 长期模式学习与适应
//!
//! 慢思考层 (>1000ms)：累积交互记录，分析反应层误差的趋势与波动率，
//! 据此调整长期交互策略。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nova_core::{LayerKind, SocialSignal};

use crate::reactive::ReactiveOutput;
use crate::responsive::ResponsiveOutput;

/// 统计分析所需的最少样本数
const MIN_SAMPLES: usize = 3;

/// 波动率阈值：低于此值视为稳定交互
const VOLATILITY_THRESHOLD: f64 = 0.3;

/// 单次交互的完整记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// 原始信号
    pub signal: SocialSignal,
    /// 反应层输出
    pub reactive: ReactiveOutput,
    /// 响应层输出
    pub responsive: ResponsiveOutput,
    /// 记录时间
    pub timestamp: DateTime<Utc>,
}

/// 交互稳定性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    /// 稳定
    Stable,
    /// 波动
    Volatile,
}

/// 反思层处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectiveOutput {
    /// 适应策略描述
    pub adaptation: String,
    /// 模式置信度 (0 到 1)
    pub pattern_confidence: f64,
    /// 累积记录数
    pub history_length: usize,
}

/// 反思层
pub struct ReflectiveLayer {
    /// 交互历史
    learning_history: Vec<InteractionRecord>,
}

impl ReflectiveLayer {
    /// 创建反思层，历史为空
    pub fn new() -> Self {
        Self {
            learning_history: Vec::new(),
        }
    }

    /// 分析长期模式并产生适应策略
    pub async fn analyze_patterns(
        &mut self,
        signal: &SocialSignal,
        reactive: &ReactiveOutput,
        responsive: &ResponsiveOutput,
    ) -> ReflectiveOutput {
        tokio::time::sleep(LayerKind::Reflective.simulated_delay()).await;

        self.learning_history.push(InteractionRecord {
            signal: signal.clone(),
            reactive: reactive.clone(),
            responsive: responsive.clone(),
            timestamp: Utc::now(),
        });

        let history_length = self.learning_history.len();

        let adaptation = if history_length >= MIN_SAMPLES {
            let recent_errors: Vec<f64> = self.learning_history[history_length - MIN_SAMPLES..]
                .iter()
                .map(|r| r.reactive.prediction_error)
                .collect();

            let trend = mean(&recent_errors);
            let volatility = std_dev(&recent_errors);
            let stability = if volatility < VOLATILITY_THRESHOLD {
                Stability::Stable
            } else {
                Stability::Volatile
            };

            debug!(trend, volatility, ?stability, "reflective analysis");

            Self::adapt_behavior(trend, volatility, stability)
        } else {
            let remaining = MIN_SAMPLES - history_length;
            format!("Building understanding... ({} more samples needed)", remaining)
        };

        ReflectiveOutput {
            adaptation,
            pattern_confidence: (history_length as f64 / 10.0).min(1.0),
            history_length,
        }
    }

    /// 按误差趋势与波动率生成适应策略
    fn adapt_behavior(error_trend: f64, volatility: f64, stability: Stability) -> String {
        match (stability, error_trend > 0.0) {
            (Stability::Stable, true) => {
                "Steady positive engagement detected. Gradually increasing complexity.".to_string()
            }
            (Stability::Stable, false) => {
                "Consistent understanding shown. Maintaining current approach.".to_string()
            }
            (Stability::Volatile, true) => format!(
                "Variable engagement (volatility: {:.2}). Adjusting to stabilize interaction.",
                volatility
            ),
            (Stability::Volatile, false) => format!(
                "Inconsistent responses (volatility: {:.2}). Simplifying approach.",
                volatility
            ),
        }
    }

    /// 累积历史
    pub fn history(&self) -> &[InteractionRecord] {
        &self.learning_history
    }
}

impl Default for ReflectiveLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// 均值
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 总体标准差
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
