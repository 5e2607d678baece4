//! 预测编码节点
//!
//! 网络中的单个预测单元：维护当前预测，计算预测误差，
//! 用 `prediction += learning_rate * error` 最小化误差。

use serde::{Deserialize, Serialize};

/// 单次更新结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeUpdate {
    /// 预测误差 (惊讶信号)
    pub error: f64,
    /// 学习后的新预测
    pub prediction: f64,
}

/// 预测编码节点
#[derive(Debug, Clone)]
pub struct PredictiveNode {
    /// 当前预测值
    prediction: f64,
    /// 学习率
    learning_rate: f64,
    /// 预测历史
    prediction_history: Vec<f64>,
    /// 误差历史
    error_history: Vec<f64>,
}

impl PredictiveNode {
    /// 创建新节点，初始预测为 0
    pub fn new(learning_rate: f64) -> Self {
        Self {
            prediction: 0.0,
            learning_rate,
            prediction_history: Vec::new(),
            error_history: Vec::new(),
        }
    }

    /// 用观测值更新预测
    pub fn update(&mut self, actual: f64) -> NodeUpdate {
        let error = actual - self.prediction;
        self.prediction += self.learning_rate * error;

        self.prediction_history.push(self.prediction);
        self.error_history.push(error);

        NodeUpdate {
            error,
            prediction: self.prediction,
        }
    }

    /// 当前预测值
    pub fn prediction(&self) -> f64 {
        self.prediction
    }

    /// 学习率
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// 预测历史
    pub fn prediction_history(&self) -> &[f64] {
        &self.prediction_history
    }

    /// 误差历史
    pub fn error_history(&self) -> &[f64] {
        &self.error_history
    }

    /// 清空状态与历史
    pub fn reset(&mut self) {
        self.prediction = 0.0;
        self.prediction_history.clear();
        self.error_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_converges_to_constant_input() {
        let mut node = PredictiveNode::new(0.1);

        let mut last_error = f64::INFINITY;
        for _ in 0..100 {
            let update = node.update(1.0);
            assert!(update.error.abs() <= last_error.abs() + 1e-12);
            last_error = update.error;
        }

        // 100 步后应接近目标值
        assert!((node.prediction() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_node_records_history() {
        let mut node = PredictiveNode::new(0.1);
        node.update(0.5);
        node.update(0.5);

        assert_eq!(node.prediction_history().len(), 2);
        assert_eq!(node.error_history().len(), 2);
        // 第一步误差等于输入 (初始预测为 0)
        assert!((node.error_history()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_node_reset() {
        let mut node = PredictiveNode::new(0.1);
        node.update(1.0);
        node.reset();

        assert_eq!(node.prediction(), 0.0);
        assert!(node.prediction_history().is_empty());
    }
}
