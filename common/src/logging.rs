//! helper functions for the logging backend
use crate::{util::find_project_root, SegError, SegResult};
use flexi_logger::{self, writers::FileLogWriter, Duplicate, LogTarget, Logger};
use log::{Level::Warn, LevelFilter};
use std::fs;

/// Creates a logging backend for the binary called `binary_name`.
/// All logs with level Info or higher are written to a logfile `logs/{binary_name}_*.log`
/// below the project root, the level can be overridden with `RUST_LOG`.
/// All logs with level at least Info are also written to stdout.
/// Logs with level at least Error are also written to stderr.
/// Panics are logged as errors, including a backtrace.
///
/// logs can be written via log::{error!, warn!, info!, debug!, trace!}
pub fn init_logging(binary_name: &str) -> SegResult<()> {
    let mut output_dir = find_project_root()?;
    output_dir.push("logs");
    fs::create_dir_all(&output_dir)?;
    let writer = FileLogWriter::builder()
        .directory(output_dir)
        .discriminant(binary_name)
        .format(flexi_logger::colored_opt_format)
        .try_build()?;
    Logger::with_env_or_str("info")
        .format(flexi_logger::colored_opt_format)
        .log_target(LogTarget::Writer(Box::new(writer)))
        .duplicate_to_stdout(Duplicate::Info)
        .duplicate_to_stderr(Duplicate::Error)
        .start()
        .map_err(|error| {
            SegError::RethrowSegError("Logging initialization failed".into(), Box::new(error))
        })?;
    log_panics::init();
    Ok(())
}

/// Creates a logging backend for use in testing
/// By default all logs with Warn or higher are printed to stdout.
/// Calling this more than once is fine, only the first call installs a logger.
pub fn init_test_logging() {
    if !log::log_enabled!(Warn) {
        if let Err(error) = Logger::with_env_or_str("warn")
            .format(flexi_logger::colored_opt_format)
            .start()
        {
            // Another test thread might have installed its logger in the meantime.
            if log::max_level() == LevelFilter::Off {
                panic!("Logging initialization failed: {}", error);
            }
            log::debug!("Test logging was initialized concurrently: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_can_be_initialized_repeatedly() {
        init_test_logging();
        init_test_logging();
        assert_ne!(log::max_level(), LevelFilter::Off);
    }
}
