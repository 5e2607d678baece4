//! 层级预测网络
//!
//! 多节点级联：每层预测下层传来的信号，只把误差的绝对值继续上传。
//! 层级越高学习率越低，自然分离快变噪声与稳定模式。

use serde::{Deserialize, Serialize};
use tracing::debug;

use nova_core::{NovaError, Result};

use crate::node::PredictiveNode;

/// 网络配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// 各层学习率，从低层到高层
    pub learning_rates: Vec<f64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        // 高层学习慢于低层
        Self {
            learning_rates: vec![0.1, 0.05, 0.02],
        }
    }
}

impl NetworkConfig {
    /// 所有层使用同一学习率
    pub fn uniform(num_levels: usize, learning_rate: f64) -> Self {
        Self {
            learning_rates: vec![learning_rate; num_levels],
        }
    }
}

/// 层级预测网络
pub struct PredictiveNetwork {
    /// 各层节点，从低层到高层
    nodes: Vec<PredictiveNode>,
}

impl PredictiveNetwork {
    /// 按配置创建网络
    pub fn new(config: NetworkConfig) -> Result<Self> {
        if config.learning_rates.is_empty() {
            return Err(NovaError::Predictor(
                "Network requires at least one level".to_string(),
            ));
        }

        let nodes = config
            .learning_rates
            .iter()
            .map(|&lr| PredictiveNode::new(lr))
            .collect();

        Ok(Self { nodes })
    }

    /// 创建默认三层网络
    pub fn default_network() -> Self {
        Self::new(NetworkConfig::default()).expect("default config is non-empty")
    }

    /// 处理一个输入，返回各层预测误差
    ///
    /// 每层消费下层的信号并产生误差，误差的绝对值作为上层的输入信号。
    pub fn process(&mut self, input: f64) -> Vec<f64> {
        let mut current_signal = input;
        let mut errors = Vec::with_capacity(self.nodes.len());

        for (level, node) in self.nodes.iter_mut().enumerate() {
            let update = node.update(current_signal);
            debug!(
                level,
                error = update.error,
                prediction = update.prediction,
                "level updated"
            );
            errors.push(update.error);
            current_signal = update.error.abs();
        }

        errors
    }

    /// 层数
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    /// 各层节点 (用于检视历史)
    pub fn nodes(&self) -> &[PredictiveNode] {
        &self.nodes
    }

    /// 重置全部节点
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }
}
