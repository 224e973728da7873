use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log output shape, chosen from the `ENVIRONMENT` variable: structured
/// JSON lines in production, human-readable console output everywhere else.
enum LogFormat {
    Json,
    Console,
}

impl LogFormat {
    fn detect() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("production") => LogFormat::Json,
            _ => LogFormat::Console,
        }
    }
}

/// Set up the tracing subscriber. `RUST_LOG` wins over the configured
/// level when present.
pub fn init_observability(service_name: &str, log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    match LogFormat::detect() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(filter))
            .try_init()?,
        LogFormat::Console => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter),
            )
            .try_init()?,
    }

    tracing::info!(service.name = service_name, "Logging initialized");
    Ok(())
}
