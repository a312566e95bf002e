use std::sync::Once;

use env_logger::fmt::TimestampPrecision;
use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "cross2d=debug,winit=warn"). When unset, `RUST_LOG` is consulted, then
/// `default_level` applies.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// `None` drops timestamps (useful when stderr is already captured by a
    /// timestamping supervisor).
    pub timestamps: Option<TimestampPrecision>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: Some(TimestampPrecision::Millis),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored, as is an already-installed foreign logger.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder
            .write_style(config.write_style)
            .format_timestamp(config.timestamps);

        if let Err(e) = builder.try_init() {
            eprintln!("cross2d: logger already installed: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}
