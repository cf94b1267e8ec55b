//! Logging Infrastructure
//!
//! Structured logging setup: console output by default, optional
//! daily-rolling file output when a log directory is configured.

use std::path::Path;

/// Initialize the tracing subscriber.
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if the log directory exists
    if let Some(dir) = log_dir {
        if Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "pelican-agent");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
