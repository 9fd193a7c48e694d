//! Logging Infrastructure
//!
//! - Console output, pretty in development and JSON in production
//! - Daily rotating application logs, 14 files kept
//! - Daily rotating security logs (`target: "security"`), 90 files kept

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, filter::filter_fn, fmt, prelude::*};

const APP_LOG_RETENTION: usize = 14;
const SECURITY_LOG_RETENTION: usize = 90;

/// Initialize the logging system
///
/// `RUST_LOG` overrides `level` when present.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_file(false).boxed()
    };

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let app_dir = dir.join("app");
            let security_dir = dir.join("security");
            fs::create_dir_all(&app_dir)?;
            fs::create_dir_all(&security_dir)?;

            let app_log = rolling_appender(&app_dir, "app", APP_LOG_RETENTION)?;
            let security_log = rolling_appender(&security_dir, "security", SECURITY_LOG_RETENTION)?;

            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(app_log)
                .with_filter(filter_fn(|meta| meta.target() != "security"));
            let security_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(security_log)
                .with_filter(filter_fn(|meta| meta.target() == "security"));
            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}

fn rolling_appender(dir: &Path, prefix: &str, keep: usize) -> anyhow::Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(keep)
        .build(dir)?;
    Ok(appender)
}
