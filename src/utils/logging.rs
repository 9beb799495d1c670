//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the StudyBuddy application.

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the guard that flushes the rolling file writer; the caller must
/// keep it alive for the lifetime of the process or file logging stops.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "studybuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log flow completions with their terminal effect
pub fn log_flow_completed(user_id: i64, flow: &str, effect: &str) {
    info!(
        user_id = user_id,
        flow = flow,
        effect = effect,
        "Flow completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_hands_back_the_flush_guard() {
        let config = LoggingConfig {
            level: "info".to_string(),
            file_path: std::env::temp_dir().to_string_lossy().into_owned(),
        };

        // The guard must outlive the subscriber setup; dropping it is what
        // flushes the rolling file writer.
        let guard = init_logging(&config).expect("logging init failed");
        info!("log line while the guard is alive");
        drop(guard);
    }
}
