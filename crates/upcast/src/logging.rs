use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("upcast")
        .build()
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the terminal logger and, when `log_file` is set, a file logger.
///
/// A log file that cannot be opened is reported on the terminal logger and
/// otherwise ignored.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    let level = level_for(verbose);
    let config = logger_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    loggers.push(TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    let mut file_error = None;
    if let Some(path) = log_file {
        match open_log_file(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(e) => file_error = Some((path.display().to_string(), e)),
        }
    }

    let _ = CombinedLogger::init(loggers);

    if let Some((path, e)) = file_error {
        log::warn!("Could not open log file {path}: {e}");
    }
    log::debug!("Debug logging enabled");
}

#[cfg(test)]
mod tests {
    use super::{LevelFilter, level_for, open_log_file};

    #[test]
    fn verbose_selects_debug_level() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn open_log_file_creates_missing_parents() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("logs").join("upcast.log");

        open_log_file(&log_path).expect("log file should be created");

        assert!(log_path.exists());
    }

    #[test]
    fn open_log_file_appends() {
        use std::io::Write as _;

        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("upcast.log");
        std::fs::write(&log_path, "first line\n").expect("seed log file");

        let mut file = open_log_file(&log_path).expect("log file should open");
        file.write_all(b"second line\n").expect("append should succeed");

        let contents = std::fs::read_to_string(&log_path).expect("log file should be readable");
        assert_eq!(contents, "first line\nsecond line\n");
    }
}
