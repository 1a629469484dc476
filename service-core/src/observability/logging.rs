use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG` filter (falling back to
/// `log_level`) and JSON lines tagged with the service name.
///
/// `.env` is loaded first so a `RUST_LOG` set there takes effect.
pub fn init_tracing(service_name: &str, log_level: &str) {
    dotenvy::dotenv().ok();

    let env_filter = env_filter(std::env::var("RUST_LOG").ok().as_deref(), log_level);

    let registry = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .json()
            .flatten_event(true),
    );

    if let Err(e) = registry.try_init() {
        eprintln!(
            "Failed to initialize tracing for service '{}': {}",
            service_name, e
        );
        return;
    }

    tracing::info!(service = %service_name, "Tracing initialized");
}

/// `rust_log` directives when present and valid, else `log_level`.
fn env_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_directives_win_over_default_level() {
        let filter = env_filter(Some("debug"), "info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn default_level_applies_without_rust_log() {
        let filter = env_filter(None, "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
