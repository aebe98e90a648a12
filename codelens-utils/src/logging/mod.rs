//! Logging bootstrap on top of the tracing ecosystem
//!
//! Binaries call [`basic_config`] (or [`init_logging`] for full control)
//! once at startup. `RUST_LOG` still overrides the configured level.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log levels exposed to configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for LogLevel {
    type Err = crate::UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(crate::UtilError::Logging(format!("Unknown log level: '{other}'"))),
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub include_location: bool,
    pub colored_output: bool,
    /// Write to stderr so stdout stays clean for report output
    pub to_stderr: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_location: false,
            colored_output: true,
            to_stderr: true,
        }
    }
}

/// Initialize logging with configuration
pub fn init_logging(config: LoggerConfig) -> crate::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::from(config.level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_ansi(config.colored_output);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.to_stderr {
        registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| crate::UtilError::Logging(format!("Failed to initialize logging: {e}")))
}

/// Initialize logging at the given level with defaults for everything else
pub fn basic_config(level: Option<LogLevel>) -> crate::Result<()> {
    init_logging(LoggerConfig {
        level: level.unwrap_or(LogLevel::Info),
        ..Default::default()
    })
}
