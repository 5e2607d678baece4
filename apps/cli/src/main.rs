//! NOVA CLI - 命令行交互与演示脚本

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nova_cognition::VirtualHuman;
use nova_core::SignalKind;
use nova_predcod::{PatternGenerator, PredictiveNetwork};

/// 演示脚本：预置的 14 步情绪交互序列
const DEMO_INTERACTIONS: [f64; 14] = [
    0.2,  // 轻微正面
    0.8,  // 强烈正面
    -0.3, // 轻微负面
    0.4, 0.6, -0.2, 0.5, 0.7, 0.9, -0.1, 0.3, 0.6, 0.8, -0.4,
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("NOVA CLI v0.1.0");
    println!("Type 'help' for available commands, 'quit' to exit.");
    println!();

    let mut vh = VirtualHuman::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("nova> ");
        stdout.flush()?;

        let mut input = String::new();
        stdin.lock().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts[0];

        match command {
            "help" => {
                println!("Available commands:");
                println!("  help          - Show this help message");
                println!("  status        - Show virtual human state");
                println!("  feed <value>  - Feed one emotion signal (-1 to 1)");
                println!("  demo          - Run the scripted interaction sequence");
                println!("  history       - Show accumulated interaction records");
                println!("  predcod       - Run the predictive network on a noisy sine wave");
                println!("  clear         - Clear the screen");
                println!("  quit / exit   - Exit the CLI");
            }
            "status" => {
                println!("Virtual Human State:");
                println!("  Emotional state: {:.3}", vh.reactive().emotional_state());
                println!("  Attention level: {:.3}", vh.reactive().attention_level());
                println!("  Interactions: {}", vh.interaction_count());
            }
            "feed" => {
                let Some(value) = parts.get(1).and_then(|s| s.parse::<f64>().ok()) else {
                    println!("Usage: feed <value between -1 and 1>");
                    continue;
                };
                let result = vh.process_interaction(SignalKind::Emotion, value).await;
                print_interaction(&result);
            }
            "demo" => {
                println!("🤖 Virtual Human Demo Starting...");
                println!("============================");
                for (i, value) in DEMO_INTERACTIONS.iter().enumerate() {
                    println!();
                    println!("📍 Interaction {}", i + 1);
                    println!("Input: emotion = {}", value);

                    let result = vh.process_interaction(SignalKind::Emotion, *value).await;
                    print_interaction(&result);
                    println!("{}", "-".repeat(50));
                }
            }
            "history" => {
                let history = vh.reflective_history();
                if history.is_empty() {
                    println!("Interaction History: (none)");
                } else {
                    println!("Interaction History: {} records", history.len());
                    for (i, record) in history.iter().enumerate() {
                        println!(
                            "  {:>3}. [{}] {}={:+.2} emotion={:+.2} error={:+.2} \"{}\"",
                            i + 1,
                            record.timestamp.format("%H:%M:%S"),
                            record.signal.kind.name(),
                            record.signal.value,
                            record.reactive.emotion,
                            record.reactive.prediction_error,
                            record.responsive.response
                        );
                    }
                }
            }
            "predcod" => {
                let generator = PatternGenerator::default();
                let signal = generator.generate(100);
                let mut network = PredictiveNetwork::default_network();

                for value in &signal {
                    network.process(*value);
                }

                println!("Predictive network after {} steps:", signal.len());
                for (level, node) in network.nodes().iter().enumerate() {
                    let recent: f64 = node
                        .error_history()
                        .iter()
                        .rev()
                        .take(10)
                        .map(|e| e.abs())
                        .sum::<f64>()
                        / 10.0;
                    println!(
                        "  Level {}: lr={:.2} prediction={:+.3} mean |error| (last 10)={:.3}",
                        level + 1,
                        node.learning_rate(),
                        node.prediction(),
                        recent
                    );
                }
            }
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
            }
            "quit" | "exit" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type 'help' for available commands.");
            }
        }
    }

    Ok(())
}

/// 打印一次交互的三层结果
fn print_interaction(result: &nova_cognition::InteractionResult) {
    println!("🔄 Processing Results:");
    println!(
        "⚡ Reactive: Emotion={:.2}, Error={:.2}",
        result.reactive.emotion, result.reactive.prediction_error
    );
    println!("🤔 Responsive: {}", result.responsive.response);
    println!("🧠 Reflective: {}", result.reflective.adaptation);
    println!(
        "⏱️ Total Processing Time: {:.3}s",
        result.total_processing_time
    );
}
