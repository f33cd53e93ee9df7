use std::{
    env,
    fmt::{Display, Formatter},
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::LazyLock,
    time::SystemTime,
};

use log::LevelFilter;
use log4rs::{
    Config,
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

#[cfg(not(debug_assertions))]
static DATA_ROOT_PREFIX: &str = "github-users";
#[cfg(debug_assertions)]
static DATA_ROOT_PREFIX: &str = "github-users-debug";

pub const LOG_FILE_NAME: &str = "github-users.log";
const LOG_PATTERN: &str = "{d} | {l} | {f}:{L} - {m}{n}";

/// Holds the log file and crash reports. Nothing else is written to disk.
pub static DATA_ROOT_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(DATA_ROOT_PREFIX)
});

#[derive(Debug)]
pub enum LoggingError {
    Io(io::Error),
    Config(String),
    AlreadyInitialised(log::SetLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Io(error) => write!(f, "failed to open log file: {error}"),
            LoggingError::Config(error) => write!(f, "invalid logging configuration: {error}"),
            LoggingError::AlreadyInitialised(error) => {
                write!(f, "logger already initialised: {error}")
            }
        }
    }
}

impl std::error::Error for LoggingError {}

impl From<io::Error> for LoggingError {
    fn from(value: io::Error) -> Self {
        LoggingError::Io(value)
    }
}

/// Reads a level such as `Info` or `debug`. Anything unparseable means `Info`.
pub fn parse_level(raw: Option<&str>) -> LevelFilter {
    match raw {
        Some(raw) => LevelFilter::from_str(raw.trim()).unwrap_or_else(|_| {
            eprintln!("ignoring invalid RUST_LOG value {raw:?}, using Info");
            LevelFilter::Info
        }),
        None => LevelFilter::Info,
    }
}

pub fn log_config(log_dir: &Path, level: LevelFilter) -> Result<Config, LoggingError> {
    fs::create_dir_all(log_dir)?;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .append(false)
        .build(log_dir.join(LOG_FILE_NAME))?;

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    Config::builder()
        .appenders(vec![
            Appender::builder().build("logfile", Box::new(logfile)),
            Appender::builder().build("console", Box::new(console)),
        ])
        .build(
            Root::builder()
                .appenders(vec!["logfile", "console"])
                .build(level),
        )
        .map_err(|e| LoggingError::Config(e.to_string()))
}

/// Installs the global logger, writing to the console and to
/// [`LOG_FILE_NAME`] under `log_dir`. The level comes from `RUST_LOG`.
pub fn init(log_dir: &Path) -> Result<(), LoggingError> {
    let level = parse_level(env::var("RUST_LOG").ok().as_deref());
    let config = log_config(log_dir, level)?;

    log4rs::init_config(config).map_err(LoggingError::AlreadyInitialised)?;
    Ok(())
}

/// Writes `crash-<unix seconds>.log` into `dir` and returns its path.
pub fn write_crash_file(dir: &Path, message: impl Display) -> Option<PathBuf> {
    let crash_file = dir.join(format!(
        "crash-{}.log",
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs()
    ));
    fs::create_dir_all(dir).ok()?;
    let mut file = File::create_new(&crash_file).ok()?;
    file.write_all(format!("GitHub Users crashed with the following panic:\n{message}").as_bytes())
        .ok()?;
    drop(file);

    Some(crash_file)
}
