//! NOVA Daemon - Headless 流式认知后端

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nova_stream::{topic, GatewayConfig, MessageBus, NovaPipeline, StreamGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_daemon=debug,nova_stream=debug,nova_cognition=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("NOVA Daemon starting...");

    // 初始化消息总线
    let bus = MessageBus::new();
    tracing::info!("Message bus initialized");

    // 初始化认知流水线
    let mut pipeline = NovaPipeline::new(bus.clone());
    tracing::info!("Cognition pipeline initialized");

    // 初始化 WebSocket 网关
    let gateway_config = GatewayConfig::from_env()?;
    let gateway = StreamGateway::new(gateway_config, bus.clone());
    tracing::info!("Stream gateway configured on {}", gateway.config().addr);

    tokio::spawn(async move {
        if let Err(e) = gateway.start().await {
            tracing::error!(error = %e, "stream gateway terminated");
        }
    });

    // 消费输入主题，驱动认知流水线
    let mut input_rx = bus.subscribe(topic::INPUT).await;
    tokio::spawn(async move {
        loop {
            match input_rx.recv().await {
                Ok(message) => match pipeline.process(&message).await {
                    Ok(result) => tracing::info!(
                        input_id = %result.input_id,
                        emotion = result.interaction.reactive.emotion,
                        adaptation = %result.interaction.reflective.adaptation,
                        "interaction processed"
                    ),
                    Err(e) => tracing::warn!(error = %e, "message rejected"),
                },
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "input consumer lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    tracing::info!("NOVA Daemon is ready!");
    tracing::info!("Press Ctrl+C to shutdown...");

    // 等待关闭信号
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    Ok(())
}
