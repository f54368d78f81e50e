use crate::utils::error::AdapterError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("gchat_adapter=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("gchat_adapter=info,warn")
        }
    })
}

pub fn init_logger(verbose: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));

    if json {
        // Container log collectors prefer one JSON object per line
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}

/// Startup configuration failures go to the log as well as stderr.
pub fn log_config_error(e: &AdapterError) {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("{}", e.user_friendly_message());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
}
