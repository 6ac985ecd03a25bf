use chrono::Local;
use log::{LevelFilter, Metadata, Record};

/// Writes `HH:MM:SS LEVEL target: message` lines to stderr
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    /// 0 → warnings only, 1 → info, 2 or more → debug
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    #[test]
    fn test_verbosity_levels() {
        let quiet = CliLogger::from_verbosity(0);
        assert!(quiet.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!quiet.enabled(&Metadata::builder().level(Level::Info).build()));

        let chatty = CliLogger::from_verbosity(5);
        assert!(chatty.enabled(&Metadata::builder().level(Level::Debug).build()));
        assert!(!chatty.enabled(&Metadata::builder().level(Level::Trace).build()));
    }
}
