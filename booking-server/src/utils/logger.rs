//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments
//! Features:
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent HTTP access logs (never deleted)

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Clean up old application log files (older than 14 days)
///
/// Call this periodically (e.g., daily) to maintain log size
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(14);

    // Application logs subdirectory
    let app_log_dir = log_dir.join("app");
    if app_log_dir.exists() {
        for entry in fs::read_dir(app_log_dir)? {
            let entry = entry?;
            let path = entry.path();

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                // Match app.YYYY-MM-DD pattern produced by the daily appender
                if let Some(date_part) = name.strip_prefix("app.")
                    && let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    && let Some(local_datetime) = Local
                        .from_local_datetime(&naive_date.and_hms_opt(0, 0, 0).unwrap_or_default())
                        .single()
                    && local_datetime < cutoff
                {
                    fs::remove_file(&path)?;
                    tracing::info!(file = %name, "Deleted old log file");
                }
            }
        }
    }

    Ok(())
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./work_dir/logs"))
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        // JSON format for production
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;

            let app_log_dir = log_dir.join("app");
            let access_log_dir = log_dir.join("access");
            fs::create_dir_all(&app_log_dir)?;
            fs::create_dir_all(&access_log_dir)?;

            // Standard application logs (rotated daily, subject to 14-day cleanup)
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "http_access"
                }));

            // Permanent HTTP access trail, one line per request
            let access_log = RollingFileAppender::new(Rotation::DAILY, access_log_dir, "access");
            let access_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(access_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "http_access"
                }));

            // Start cleanup task
            tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));

            subscriber
                .with(console_layer)
                .with(app_layer)
                .with(access_layer)
                .init();
        } else {
            subscriber.with(console_layer).init();
        }
    } else {
        // Pretty format for development
        let console_layer = fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;

            let app_log_dir = log_dir.join("app");
            let access_log_dir = log_dir.join("access");
            fs::create_dir_all(&app_log_dir)?;
            fs::create_dir_all(&access_log_dir)?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let app_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "http_access"
                }));

            let access_log = RollingFileAppender::new(Rotation::DAILY, access_log_dir, "access");
            let access_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(access_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "http_access"
                }));

            tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));

            subscriber
                .with(console_layer)
                .with(app_layer)
                .with(access_layer)
                .init();
        } else {
            subscriber.with(console_layer).init();
        }
    }

    Ok(())
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Initialize the logging system (console only)
///
/// Convenience function for console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}
