//! Logging setup shared by the service binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,hiclimate=debug";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    /// `HICLIMATE_LOG_FORMAT=text` switches to human readable lines
    pub fn from_env() -> Self {
        std::env::var("HICLIMATE_LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "plain" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize logging.
/// - JSON logs unless HICLIMATE_LOG_FORMAT says otherwise
/// - RUST_LOG respected; default to "info,hiclimate=debug"
pub fn init(service_name: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let format = LogFormat::from_env();

    let registry = tracing_subscriber::registry().with(EnvFilter::new(env_filter));
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(service = %service_name, ?format, "Logging initialized");
}
