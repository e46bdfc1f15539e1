use std::sync::Arc;

use agri_pilot::app::AppController;
use agri_pilot::config::AppConfig;
use agri_pilot::gateway::GeminiGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Configuration is fatal before any UI renders: no key, no app.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("  export GEMINI_API_KEY=...");
            std::process::exit(1);
        }
    };

    eprintln!("🌱 Agri-Pilot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Image model: {}\n", config.image_model);

    let gateway = Arc::new(GeminiGateway::new(&config));
    let controller = AppController::new(gateway);

    agri_pilot::repl::run(&controller).await?;

    Ok(())
}
