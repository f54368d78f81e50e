use std::sync::Arc;

use clap::Parser;
use gchat_adapter::adapters::http;
use gchat_adapter::core::ConfigProvider;
use gchat_adapter::utils::logger;
use gchat_adapter::{AdapterConfig, AlertPipeline, CliConfig, GoogleChatClient, RelayEngine};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting gchat-adapter");

    let config = match AdapterConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::log_config_error(&e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!(
        listen_addr = %config.listen_addr(),
        timeout = ?config.request_timeout(),
        "Resolved configuration"
    );

    let sink = GoogleChatClient::from_config(&config)?;
    let engine = Arc::new(RelayEngine::new(AlertPipeline::new(sink)));

    let listener = match TcpListener::bind(config.listen_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("❌ Server failed to start: {}", e);
            eprintln!("❌ Server failed to start: {}", e);
            std::process::exit(1);
        }
    };

    http::serve(listener, engine).await?;

    Ok(())
}
