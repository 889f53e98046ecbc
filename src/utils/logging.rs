use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system with the specified log level.
///
/// # Arguments
///
/// * `log_level` - The desired log level or filter directive (e.g. "info", "dagverslag=debug")
/// * `with_file` - Whether to also log to a daily rotating file in the "logs" directory.
///   The interactive mode writes to the terminal itself, so it logs to the file only.
/// * `with_stdout` - Whether to log to stdout
pub fn init_logging(log_level: &str, with_file: bool, with_stdout: bool) {
    let filter = match EnvFilter::try_new(log_level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            EnvFilter::new("info")
        }
    };

    let stdout_layer = with_stdout.then(|| fmt::layer().with_line_number(true));
    let file_layer = with_file.then(|| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "dagverslag.log");
        fmt::layer()
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}
