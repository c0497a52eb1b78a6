use std::{
    io::Write,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use core::str::FromStr;

use termcolor::{StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color, WriteColor};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::*;

use fmt::SegmentSpec;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CustomFmt(usize);

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

pub enum LevelFmt {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl LevelFmt {

    #[inline(always)]
    fn level(&self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warn => Level::Warn,
            Self::Info => Level::Info,
            Self::Debug => Level::Debug,
            Self::Trace => Level::Trace,
            Self::Other(_, level) => *level,
        }
    }
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("off") {
            Ok(Self::Always)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Per-target level filters, parsed from a `RUST_LOG` style string such as
/// `warn,seqbuf::buffer=trace`.
#[derive(Clone, Debug)]
pub struct Filters {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filters {

    pub fn parse(spec: &str) -> Self {
        let mut filters = Self::default();
        for arg in spec.split(',') {
            let arg = arg.trim();
            if arg.is_empty() {
                continue
            }
            let (module, level) = match arg.find('=') {
                Some(j) => (Some(arg[..j].trim()), arg[j + 1..].trim()),
                None => (None, arg),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            if let Some(module) = module {
                let entry = filters.target_levels
                    .entry(CompactString::new(module))
                    .or_insert(level);
                *entry = (*entry).min(level);
            } else {
                filters.base_level = level;
            }
        }
        filters
    }

    pub fn from_env() -> Self {
        match std::env::var("RUST_LOG") {
            Ok(env) => Self::parse(&env),
            Err(_) => Self::default(),
        }
    }

    /// Level of the most specific `::` prefix of `target` that has a filter.
    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        self.target_level(target) >= level
    }
}

struct Logger {
    out: Box<dyn WriteColor + Send>,
    info_fmt: LogFmt,
    warn_fmt: LogFmt,
    error_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    custom_fmt: Vec<LogFmt>,
    filters: Filters,
}

impl Logger {

    fn new(filters: Filters, out: Box<dyn WriteColor + Send>) -> Self {
        Self {
            out,
            info_fmt: LogFmt::labeled("INFO", Color::Green),
            warn_fmt: LogFmt::labeled("WARN", Color::Yellow),
            error_fmt: LogFmt::labeled("ERROR", Color::Red),
            debug_fmt: LogFmt::labeled("DEBUG", Color::Blue),
            trace_fmt: LogFmt::labeled("TRACE", Color::Cyan),
            custom_fmt: Vec::new(),
            filters,
        }
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: core::fmt::Arguments) -> Result<bool> {
        if !self.filters.enabled(target, level.level()) {
            return Ok(false)
        }
        let fmt = match level {
            LevelFmt::Error => &self.error_fmt,
            LevelFmt::Warn => &self.warn_fmt,
            LevelFmt::Info => &self.info_fmt,
            LevelFmt::Debug => &self.debug_fmt,
            LevelFmt::Trace => &self.trace_fmt,
            LevelFmt::Other(CustomFmt(index), _) => {
                self.custom_fmt
                    .get(index)
                    .ok_or(LogError::UnknownFormat { index })?
            },
        };
        for segment in fmt {
            match segment {
                SegmentSpec::Message(log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.out.set_color(color_spec)?;
                        write!(self.out, "{}", msg)?;
                        self.out.reset()?;
                    } else {
                        write!(self.out, "{}", msg)?;
                    }
                },
                SegmentSpec::Target(log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.out.set_color(color_spec)?;
                        self.out.write_all(target.as_bytes())?;
                        self.out.reset()?;
                    } else {
                        self.out.write_all(target.as_bytes())?;
                    }
                },
                SegmentSpec::Text(text, log_spec) => {
                    if let Some(color_spec) = &log_spec.color_spec {
                        self.out.set_color(color_spec)?;
                        self.out.write_all(text.as_bytes())?;
                        self.out.reset()?;
                    } else {
                        self.out.write_all(text.as_bytes())?;
                    }
                },
            }
        }
        self.out.write_all(b"\n")?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

#[inline(always)]
fn logger() -> Option<MutexGuard<'static, Logger>> {
    LOGGER
        .get()
        .map(|logger| logger.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Installs the global logger with filters read from `RUST_LOG`.
///
/// Calling this more than once keeps the first logger.
pub fn init() {
    init_with(Filters::from_env());
}

pub fn init_with(filters: Filters) {
    init_with_output(filters, StandardStream::stderr(ColorChoice::Auto));
}

/// Installs the global logger writing records to `out` instead of stderr.
pub fn init_with_output(filters: Filters, out: impl WriteColor + Send + 'static) {
    if LOGGER.get().is_some() { return }
    let _ = LOGGER.set(Mutex::new(Logger::new(filters, Box::new(out))));
}

#[inline(always)]
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

#[inline(always)]
pub fn enabled(target: &str, level: Level) -> bool {
    logger().is_some_and(|logger| logger.filters.enabled(target, level))
}

#[inline(always)]
pub fn error_fmt(f: impl FnMut(&mut LogFmtBuilder)) {
    level_fmt(f, |logger| &mut logger.error_fmt)
}

#[inline(always)]
pub fn warn_fmt(f: impl FnMut(&mut LogFmtBuilder)) {
    level_fmt(f, |logger| &mut logger.warn_fmt)
}

#[inline(always)]
pub fn info_fmt(f: impl FnMut(&mut LogFmtBuilder)) {
    level_fmt(f, |logger| &mut logger.info_fmt)
}

#[inline(always)]
pub fn debug_fmt(f: impl FnMut(&mut LogFmtBuilder)) {
    level_fmt(f, |logger| &mut logger.debug_fmt)
}

#[inline(always)]
pub fn trace_fmt(f: impl FnMut(&mut LogFmtBuilder)) {
    level_fmt(f, |logger| &mut logger.trace_fmt)
}

fn level_fmt(
    mut f: impl FnMut(&mut LogFmtBuilder),
    select: impl FnOnce(&mut Logger) -> &mut LogFmt,
) {
    if let Some(mut logger) = logger() {
        let mut builder = LogFmtBuilder::new(select(&mut *logger));
        f(&mut builder);
    }
}

/// Registers a format for [`LevelFmt::Other`]. Returns `None` before [`init`].
#[inline(always)]
pub fn custom_fmt(fmt: LogFmt) -> Option<CustomFmt> {
    let mut logger = logger()?;
    logger.custom_fmt.push(fmt);
    Some(CustomFmt(logger.custom_fmt.len() - 1))
}

/// Writes one record. Returns `Ok(false)` when the record was filtered out
/// or no logger has been installed.
#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: core::fmt::Arguments) -> Result<bool> {
    match logger() {
        Some(mut logger) => logger.log(target, level, args),
        None => Ok(false),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log(module_path!(), $level, format_args!($($arg)+)).unwrap_or(false)
    };
}

/// Logs at error level under the calling module's path, evaluating to
/// whether a record was written.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log!($crate::LevelFmt::Error, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::LevelFmt::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::LevelFmt::Info, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::LevelFmt::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::LevelFmt::Trace, $($arg)+) };
}
