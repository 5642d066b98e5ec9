use std::io::stderr;
use std::io::Write;
use std::sync::OnceLock;

use log::set_logger;
use log::set_max_level;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use log::SetLoggerError;

pub struct Logger;

impl Logger {
    pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
        set_logger(LOGGER.get_or_init(move || Logger)).map(|()| set_max_level(max_level))
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        use std::fmt::Write as _;
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut buffer = String::with_capacity(4096);
        let prefix = match record.level() {
            Level::Error => "ERROR: ",
            Level::Warn => "WARNING: ",
            _ => "",
        };
        let _ = writeln!(&mut buffer, "{prefix}{}", record.args());
        let _ = stderr().lock().write_all(buffer.as_bytes());
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();
