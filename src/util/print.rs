use std::{
    fs::File,
    io::{Read, Seek, Write},
    sync::{Mutex, OnceLock},
};

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const TRACE: &str = DIM;
pub const INFO: &str = "\x1b[38;2;41;184;219m";
pub const WARN: &str = "\x1b[38;2;245;245;67m";
pub const ERR: &str = "\x1b[38;2;241;76;76m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Trace => "[TRACE]",
            Level::Debug => "[DEBUG]",
            Level::Info => " [INFO]",
            Level::Warn => " [WARN]",
            Level::Error => "[ERROR]",
        }
    }
}

pub struct Record<'a> {
    pub level: Level,
    pub msg: std::fmt::Arguments<'a>,
}

pub trait Sink: Send + Sync {
    fn name(&self) -> &'static str {
        ""
    }
    fn write(&mut self, record: &Record);
}

pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn write(&mut self, record: &Record) {
        let mut stdout = std::io::stdout();
        let msg = record.msg;
        match record.level {
            Level::Trace => writeln!(stdout, "{TRACE}{msg}{RESET}"),
            Level::Debug => writeln!(stdout, "{msg}"),
            Level::Info => writeln!(stdout, "{INFO}{msg}{RESET}"),
            Level::Warn => writeln!(stdout, "{WARN}{msg}{RESET}"),
            Level::Error => writeln!(stdout, "{ERR}{msg}{RESET}"),
        }
        .unwrap_or_default()
    }
}

/// Appends to a log file, keeping only the newest half once `max_size` is hit.
pub struct RotatingFileSink {
    log_file_path: String,
    log_file: File,
    max_size: u64,
}

impl RotatingFileSink {
    pub fn new(log_file_path: &str, max_size: u64) -> std::io::Result<Self> {
        if let Some(parent) = std::path::Path::new(log_file_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let log_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_file_path)?;
        Ok(Self {
            log_file_path: log_file_path.to_string(),
            log_file,
            max_size,
        })
    }

    fn write_str(&mut self, str: &str) -> std::io::Result<()> {
        self.log_file.write_all(str.as_bytes())?;
        if self.log_file.metadata()?.len() >= self.max_size {
            let keep = self.max_size / 2;
            let mut buf = vec![0; keep as usize];
            self.log_file.seek(std::io::SeekFrom::End(-(keep as i64)))?;
            self.log_file.read_exact(&mut buf)?;
            self.log_file.set_len(0)?;
            self.log_file.seek(std::io::SeekFrom::Start(0))?;
            self.log_file.write_all(&buf)?;
        }
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &'static str {
        "rotating_file"
    }

    fn write(&mut self, record: &Record) {
        let line = format!("  {} {}\n", record.level.tag(), record.msg);
        if let Err(err) = self.write_str(&line) {
            // nowhere else to report it
            eprintln!("failed logging to file {}: {err}", self.log_file_path);
        }
    }
}

#[derive(Default)]
pub struct Logger {
    pub sinks: Vec<Box<dyn Sink>>,
    /// records below this level are discarded
    pub min_level: Option<Level>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn console() -> Self {
        Self {
            sinks: vec![Box::new(ConsoleSink)],
            min_level: None,
        }
    }

    pub fn log(&mut self, record: Record) {
        if self.min_level.is_some_and(|min| record.level < min) {
            return;
        }
        for sink in &mut self.sinks {
            sink.write(&record);
        }
    }

    pub fn log_to(&mut self, sink_name: &str, record: Record) {
        for sink in &mut self.sinks {
            if sink.name() == sink_name {
                sink.write(&record);
            }
        }
    }
}

pub static GLOBAL_LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

pub fn set_global_logger(logger: Logger) -> Result<(), &'static str> {
    GLOBAL_LOGGER
        .set(Mutex::new(logger))
        .map_err(|_| "Global logger is already set")
}

/// Routes a record to the global logger, silently dropping it if none is installed.
pub fn log_global(record: Record) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .log(record);
    }
}

/// Like [`log_global`], but only the sinks named `sink_name` receive the record.
pub fn log_global_to(sink_name: &str, record: Record) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .log_to(sink_name, record);
    }
}

#[macro_export]
macro_rules! log_sink {
    ($sink_name:expr, $level:expr, $($args:tt)*) => {
        $crate::util::print::log_global_to($sink_name, $crate::util::print::Record {
            level: $level,
            msg: format_args!($($args)*),
        })
    };
}

#[macro_export]
macro_rules! log_level {
    ($level:expr, $($args:tt)*) => {
        $crate::util::print::log_global($crate::util::print::Record {
            level: $level,
            msg: format_args!($($args)*),
        })
    };
}

#[macro_export]
macro_rules! trace {
    ($($args:tt)*) => { $crate::log_level!($crate::util::print::Level::Trace, $($args)*) };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => { $crate::log_level!($crate::util::print::Level::Debug, $($args)*) };
}

#[macro_export]
macro_rules! info {
    ($($args:tt)*) => { $crate::log_level!($crate::util::print::Level::Info, $($args)*) };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => { $crate::log_level!($crate::util::print::Level::Warn, $($args)*) };
}

#[macro_export]
macro_rules! err {
    ($($args:tt)*) => { $crate::log_level!($crate::util::print::Level::Error, $($args)*) };
}
