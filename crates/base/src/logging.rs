use {
    anyhow::{Context, Result},
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        fmt,
        fs::{File, OpenOptions, create_dir_all},
        io::Write,
        path::{Path, PathBuf},
        str::FromStr,
        sync::Mutex,
        time::{SystemTime, UNIX_EPOCH},
    },
};

/// Environment variable that overrides the default max level.
pub const LEVEL_ENV: &str = "PHONEME_LOG";

/// A UTC wall-clock instant split into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    pub fn from_unix(secs: u64) -> Self {
        let (year, month, day) = civil_from_days((secs / 86400) as i64);
        let seconds_of_day = (secs % 86400) as u32;
        Self {
            year,
            month,
            day,
            hour: seconds_of_day / 3600,
            minute: (seconds_of_day % 3600) / 60,
            second: seconds_of_day % 60,
        }
    }

    /// `YYYY-MM-DD`, the stem of the daily log file.
    pub fn date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:02}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

// Howard Hinnant's days-to-civil conversion (public domain).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let shifted = days + 719468;
    let era = if shifted >= 0 { shifted } else { shifted - 146096 } / 146097;
    let day_of_era = (shifted - era * 146097) as u32;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_index + 2) / 5 + 1;
    let month = if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    };
    let year = year_of_era as i64 + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Render a record as `TIMESTAMP [LEVEL] [thread:ID] file:line - message`.
pub fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        Timestamp::now(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// Writes every record to stdout.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Writes every record to stderr, leaving stdout to the program's own output.
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

struct DailyFile {
    dir: PathBuf,
    date: String,
    file: File,
}

impl DailyFile {
    fn open(dir: &Path, date: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{}.log", date)))
    }

    fn roll_to(&mut self, date: String) {
        match Self::open(&self.dir, &date) {
            Ok(file) => {
                self.file = file;
                self.date = date;
            }
            // keep writing to the previous day's file
            Err(error) => eprintln!("cannot open log file for {}: {}", date, error),
        }
    }
}

/// Appends records to `<dir>/YYYY-MM-DD.log`, switching files when the UTC date changes.
pub struct FileLogger {
    state: Mutex<DailyFile>,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        create_dir_all(&dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
        let date = Timestamp::now().date();
        let file = DailyFile::open(&dir, &date)
            .with_context(|| format!("cannot open log file in {}", dir.display()))?;
        Ok(Self {
            state: Mutex::new(DailyFile { dir, date, file }),
        })
    }

    pub fn current_path(&self) -> PathBuf {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.dir.join(format!("{}.log", state.date))
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let today = Timestamp::now().date();
        if today != state.date {
            state.roll_to(today);
        }
        let line = format_record(record);
        if let Err(error) = writeln!(state.file, "{}", line) {
            eprintln!("cannot write log file: {}", error);
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(name.trim()).ok()
}

/// Max level from `PHONEME_LOG`, else Debug for debug builds and Info for release.
pub fn default_level() -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|name| parse_level(&name))
        .unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}

fn install(logger: &'static dyn Log) {
    // only the first logger per process wins
    if log::set_logger(logger).is_ok() {
        log::set_max_level(default_level());
    }
}

pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;
    install(&LOGGER);
}

pub fn init_stderr_logger() {
    static LOGGER: StderrLogger = StderrLogger;
    install(&LOGGER);
}

pub fn init_file_logger(dir: impl Into<PathBuf>) -> Result<()> {
    let logger = FileLogger::new(dir)?;
    install(Box::leak(Box::new(logger)));
    Ok(())
}

/// Log at error level, flush stdout and stderr, then exit with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        $crate::log::logger().flush();
        {
            use std::io::Write;
            let _ = std::io::stdout().flush();
            let _ = std::io::stderr().flush();
        }
        std::process::exit(1);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_leap_day() {
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
    }

    #[test]
    fn test_civil_from_days_year_end() {
        assert_eq!(civil_from_days(20088), (2024, 12, 31));
    }

    #[test]
    fn test_timestamp_from_unix() {
        // 2024-12-31T23:59:58
        let ts = Timestamp::from_unix(20088 * 86400 + 86398);
        assert_eq!(ts.to_string(), "2024-12-31T23:59:58");
        assert_eq!(ts.date(), "2024-12-31");
    }

    #[test]
    fn test_timestamp_now_shape() {
        let ts = Timestamp::now().to_string();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level(" DEBUG "), Some(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_file_logger_rolls_to_today() {
        let dir = std::env::temp_dir().join(format!("phoneme-log-{}-roll", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let logger = FileLogger::new(&dir).expect("create logger");
        let stale_path = dir.join("1999-01-01.log");
        {
            let mut state = logger.state.lock().unwrap();
            state.date = "1999-01-01".to_string();
            state.file = DailyFile::open(&dir, "1999-01-01").unwrap();
        }

        let record = log::RecordBuilder::new()
            .level(log::Level::Warn)
            .file(Some("roll.rs"))
            .line(Some(7))
            .args(format_args!("after midnight"))
            .build();
        logger.log(&record);
        logger.flush();

        assert!(stale_path.exists());
        let today_path = logger.current_path();
        assert_ne!(today_path, stale_path);
        let content = std::fs::read_to_string(&today_path).unwrap();
        assert!(content.contains("after midnight"));
        assert!(std::fs::read_to_string(&stale_path).unwrap().is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
