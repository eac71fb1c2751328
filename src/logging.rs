use std::io;
use std::path::Path;

use drone_relay_config::LoggingConfiguration;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};


/// Where log records end up, resolved from `logging.output` (and `logging.file`).
enum LogDestination<'a> {
    Stdout,
    Stderr,
    File(&'a Path),
}

fn log_destination(logging: &LoggingConfiguration) -> Result<LogDestination<'_>> {
    match logging.output.as_str() {
        "stdout" => Ok(LogDestination::Stdout),
        "stderr" => Ok(LogDestination::Stderr),
        "file" => logging
            .file
            .as_deref()
            .map(LogDestination::File)
            .ok_or_else(|| miette!("logging.output is \"file\", but logging.file is not set.")),
        other => Err(miette!(
            "Unsupported logging.output \"{}\" (expected stdout, stderr or file).",
            other
        )),
    }
}


/// Initializes the global tracing subscriber as described by the `[logging]` table.
///
/// When logging to a file, the returned guard must be kept alive for as long as
/// logs should be flushed.
pub fn initialize_tracing(logging: &LoggingConfiguration) -> Result<Option<WorkerGuard>> {
    let level_filter = logging
        .level_filter()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to parse field logging.level: {}", logging.level))?;

    let (writer, guard, use_ansi) = match log_destination(logging)? {
        LogDestination::Stdout => (BoxMakeWriter::new(io::stdout), None, true),
        LogDestination::Stderr => (BoxMakeWriter::new(io::stderr), None, true),
        LogDestination::File(log_file_path) => {
            let log_file_directory = log_file_path
                .parent()
                .filter(|directory| !directory.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let log_file_name = log_file_path
                .file_name()
                .ok_or_else(|| miette!("logging.file has no file name."))?;

            std::fs::create_dir_all(log_file_directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create missing log directory at {}.",
                        log_file_directory.display()
                    )
                })?;

            let (non_blocking_writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(log_file_directory, log_file_name),
            );

            (BoxMakeWriter::new(non_blocking_writer), Some(guard), false)
        }
    };

    let format_layer = fmt::layer().with_writer(writer).with_ansi(use_ansi);

    let initialization_result = match logging.format.as_str() {
        "text" => tracing_subscriber::registry()
            .with(format_layer)
            .with(level_filter)
            .try_init(),
        "json" => tracing_subscriber::registry()
            .with(format_layer.json())
            .with(level_filter)
            .try_init(),
        other => {
            return Err(miette!(
                "Unsupported logging.format \"{}\" (expected text or json).",
                other
            ));
        }
    };

    initialization_result
        .into_diagnostic()
        .wrap_err("Failed to install tracing subscriber.")?;

    Ok(guard)
}
