//! Print the resolved Ollama settings and probe the configured server.

use ollama_settings::{load_dotenv, logging, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let settings = Settings::from_env()?;
    logging::init(settings.log_level);

    tracing::debug!("Resolved settings: {:?}", settings);

    let service = settings.to_service_config();
    println!("{}", serde_json::to_string_pretty(&service)?);

    if !settings.check_service_reachable().await {
        tracing::warn!("🔌 Ollama unreachable at {}", settings.service_base_url);
        println!("reachable: false");
        return Ok(());
    }

    println!("reachable: true");

    match settings.list_available_models().await {
        Some(models) if models.is_empty() => println!("models: (none loaded)"),
        Some(models) => {
            println!("models:");
            for name in models {
                println!("  - {}", name);
            }
        }
        None => println!("models: unavailable"),
    }

    Ok(())
}
