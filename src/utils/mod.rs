pub mod build_info;

use std::{path::PathBuf, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "chau_money=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Returns the application data directory, defaulting to `~/.chau_money`.
///
/// `CHAU_MONEY_HOME` overrides the location.
pub fn app_data_dir() -> PathBuf {
    chau_config::default_base_dir()
}
