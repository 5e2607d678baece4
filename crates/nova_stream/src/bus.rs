//! 主题消息总线
//!
//! 进程内的发布/订阅代理：每个主题一条 broadcast 通道，按需惰性创建。
//! 承担外部消息代理在原型中的角色。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::protocol::StreamMessage;

/// 每主题通道容量
const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// 主题消息总线
#[derive(Clone)]
pub struct MessageBus {
    /// 主题通道表
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<StreamMessage>>>>,
    /// 通道容量
    capacity: usize,
}

impl MessageBus {
    /// 创建新总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// 指定通道容量创建总线
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// 获取或创建主题通道
    async fn channel(&self, topic: &str) -> broadcast::Sender<StreamMessage> {
        {
            let topics = self.topics.read().await;
            if let Some(tx) = topics.get(topic) {
                return tx.clone();
            }
        }

        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// 非阻塞发布，返回接收到消息的订阅者数
    ///
    /// 无订阅者不是错误：消息被丢弃并记录。
    pub async fn publish(&self, topic: &str, message: StreamMessage) -> usize {
        let tx = self.channel(topic).await;
        match tx.send(message) {
            Ok(receivers) => {
                debug!(topic, receivers, "message delivered");
                receivers
            }
            Err(_) => {
                warn!(topic, "message dropped, no subscribers");
                0
            }
        }
    }

    /// 订阅主题
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<StreamMessage> {
        self.channel(topic).await.subscribe()
    }

    /// 已创建的主题列表
    pub async fn topics(&self) -> Vec<String> {
        let topics = self.topics.read().await;
        topics.keys().cloned().collect()
    }

    /// 主题数量
    pub async fn topic_count(&self) -> usize {
        let topics = self.topics.read().await;
        topics.len()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
