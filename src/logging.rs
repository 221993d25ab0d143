use std::{fs::OpenOptions, path::PathBuf, sync::Arc};

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

lazy_static::lazy_static! {
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Resolve where log output goes, creating parent folders of a custom path
pub fn log_path(custom_log_path: Option<PathBuf>) -> Result<PathBuf> {
    match custom_log_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(path)
        }
        None => Ok(std::env::current_dir()?.join(LOG_FILE.as_str())),
    }
}

/// Initialize logging with custom path and/or level
///
/// A CLI level overrides `RUST_LOG`; otherwise the env filter applies with
/// WARN as the default directive.
pub fn init_with(custom_log_path: Option<PathBuf>, level: Option<tracing::Level>) -> Result<()> {
    let log_path = log_path(custom_log_path)?;
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.unwrap_or(tracing::Level::WARN).into())
        .from_env_lossy();

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Arc::new(log_file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
