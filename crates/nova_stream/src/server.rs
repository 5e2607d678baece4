//! WebSocket 网关
//!
//! 外部客户端的接入点：入站文本帧解析为流式消息后发布到输入主题，
//! 三个层级输出主题反向扇出给已连接的客户端。

use std::net::SocketAddr;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::bus::MessageBus;
use crate::protocol::{topic, StreamMessage};

/// 网关配置
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// 监听地址
    pub addr: SocketAddr,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8765".parse().unwrap(),
        }
    }
}

impl GatewayConfig {
    /// 从环境变量读取配置 (NOVA_ADDR)，缺省用默认地址
    pub fn from_env() -> nova_core::Result<Self> {
        match std::env::var("NOVA_ADDR") {
            Ok(raw) => {
                let addr = raw.parse().map_err(|_| {
                    nova_core::NovaError::Config(format!("invalid NOVA_ADDR: {}", raw))
                })?;
                Ok(Self { addr })
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/// WebSocket 网关
pub struct StreamGateway {
    config: GatewayConfig,
    /// 消息总线
    bus: MessageBus,
}

impl StreamGateway {
    /// 创建网关
    pub fn new(config: GatewayConfig, bus: MessageBus) -> Self {
        Self { config, bus }
    }

    /// 构建 Axum 路由
    pub fn build_router(&self) -> Router {
        let bus = self.bus.clone();
        Router::new()
            .route(
                "/ws",
                get(move |ws: WebSocketUpgrade| async move {
                    ws.on_upgrade(move |socket| handle_socket(socket, bus))
                }),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// 启动网关
    pub async fn start(&self) -> nova_core::Result<()> {
        let app = self.build_router();
        let listener = tokio::net::TcpListener::bind(&self.config.addr)
            .await
            .map_err(|e| nova_core::NovaError::Protocol(e.to_string()))?;

        info!(addr = %self.config.addr, "stream gateway listening");

        axum::serve(listener, app)
            .await
            .map_err(|e| nova_core::NovaError::Protocol(e.to_string()))?;

        Ok(())
    }

    /// 获取配置
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// 处理 WebSocket 连接
async fn handle_socket(socket: WebSocket, bus: MessageBus) {
    let (mut sender, mut receiver) = socket.split();

    // 层级输出扇出给客户端
    let mut reactive_rx = bus.subscribe(topic::REACTIVE_OUTPUT).await;
    let mut responsive_rx = bus.subscribe(topic::RESPONSIVE_OUTPUT).await;
    let mut reflective_rx = bus.subscribe(topic::REFLECTIVE_OUTPUT).await;

    let forward = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                Ok(m) = reactive_rx.recv() => m,
                Ok(m) = responsive_rx.recv() => m,
                Ok(m) = reflective_rx.recv() => m,
                else => break,
            };

            match msg.to_json() {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "failed to serialize outbound message"),
            }
        }
    });

    // 入站消息发布到输入主题
    while let Some(Ok(frame)) = receiver.next().await {
        if let Message::Text(text) = frame {
            match StreamMessage::from_json(&text) {
                Ok(msg) => {
                    bus.publish(topic::INPUT, msg).await;
                }
                Err(e) => warn!(error = %e, "malformed inbound message"),
            }
        }
    }

    forward.abort();
}
