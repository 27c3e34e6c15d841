use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use resq_admin::cli::{describe_config, Cli, Commands};
use resq_admin::config::AppConfig;
use resq_admin::{app, is_development, AppState};

const DEFAULT_LOG_FILTER: &str = "resq_admin=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so BASE_API_URL, SESSION_SECRET, etc. apply locally.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::from_env());

    match cli.command() {
        Commands::Config { json } => {
            println!("{}", describe_config(&config, json));
            Ok(())
        }
        Commands::Serve => serve(config).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting ResQ admin console in {:?} mode", config.environment);

    if config.uses_default_secret() && !is_development!(config) {
        tracing::warn!(
            "SESSION_SECRET is not set; using the built-in default secret outside development"
        );
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(config).context("invalid configuration")?;
    tracing::info!(upstream = %state.upstream.base_url(), "operations API");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("ResQ admin console listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
