//! 响应层 - 上下文感知响应
//!
//! 中速层 (300-1000ms)：维护最近信号的滑动窗口，
//! 整合反应层状态生成上下文预测，并据此选择言语响应。

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nova_core::{LayerKind, SocialSignal};

use crate::reactive::ReactiveOutput;

/// 滑动上下文窗口容量
const CONTEXT_WINDOW_SIZE: usize = 10;

/// 惊讶响应阈值：误差超过 +0.5 视为出乎意料
const SURPRISE_THRESHOLD: f64 = 0.5;

/// 高惊讶语料
const HIGH_SURPRISE_RESPONSES: [&str; 3] = [
    "I notice this surprised you. Let me explain differently.",
    "That was unexpected! Let's break this down more clearly.",
    "Interesting reaction! Should we explore this from another angle?",
];

/// 舒适语料
const COMFORTABLE_RESPONSES: [&str; 3] = [
    "You seem comfortable with this. Shall we go deeper?",
    "You're following well! Want to explore more advanced aspects?",
    "This seems to resonate with you. Let's build on that.",
];

/// 中性语料
const NEUTRAL_RESPONSES: [&str; 4] = [
    "I see you're following along. Let's continue.",
    "We're making good progress here.",
    "You're engaging well with this material.",
    "Let's keep going at this pace.",
];

/// 响应层处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsiveOutput {
    /// 预测的下一个信号值
    pub predicted_next: f64,
    /// 选择的言语响应
    pub response: String,
    /// 上下文置信度 (窗口填充比例)
    pub context_confidence: f64,
}

/// 响应层
pub struct ResponsiveLayer {
    /// 最近信号的滑动窗口
    context_window: VecDeque<SocialSignal>,
}

impl ResponsiveLayer {
    /// 创建响应层，上下文为空
    pub fn new() -> Self {
        Self {
            context_window: VecDeque::with_capacity(CONTEXT_WINDOW_SIZE),
        }
    }

    /// 结合反应层输出处理上下文
    ///
    /// 上下文预测 = 窗口均值 * 0.8 + 反应层情绪 * 0.2，
    /// 再按反应层误差落在哪个区间选择语料。
    pub async fn process_context(
        &mut self,
        signal: &SocialSignal,
        reactive: &ReactiveOutput,
    ) -> ResponsiveOutput {
        tokio::time::sleep(LayerKind::Responsive.simulated_delay()).await;

        self.context_window.push_back(signal.clone());
        if self.context_window.len() > CONTEXT_WINDOW_SIZE {
            self.context_window.pop_front();
        }

        let context_pattern = self.context_window.iter().map(|s| s.value).sum::<f64>()
            / self.context_window.len() as f64;
        let predicted_next = context_pattern * 0.8 + reactive.emotion * 0.2;

        let response = self.select_response(reactive.prediction_error);

        debug!(
            predicted_next,
            window_len = self.context_window.len(),
            "responsive layer updated"
        );

        ResponsiveOutput {
            predicted_next,
            response,
            context_confidence: self.context_window.len() as f64 / CONTEXT_WINDOW_SIZE as f64,
        }
    }

    /// 按预测误差选择言语响应
    fn select_response(&self, error: f64) -> String {
        let mut rng = rand::thread_rng();
        let pool: &[&str] = if error > SURPRISE_THRESHOLD {
            &HIGH_SURPRISE_RESPONSES
        } else if error < -SURPRISE_THRESHOLD {
            &COMFORTABLE_RESPONSES
        } else {
            &NEUTRAL_RESPONSES
        };

        pool.choose(&mut rng)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// 当前上下文窗口长度
    pub fn context_len(&self) -> usize {
        self.context_window.len()
    }
}

impl Default for ResponsiveLayer {
    fn default() -> Self {
        Self::new()
    }
}
