use log::error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "locus.log";
const DEFAULT_LEVEL: &str = "info";
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Logger builder.
///
/// Writes to the console and/or a daily rolling file, and optionally prunes
/// old log files in the background.
pub struct LoggerConfig {
    /// Rolled files are named `{file_prefix}.{date}`.
    file_prefix: String,
    log_dir: PathBuf,
    /// chrono strftime format
    time_format: String,
    /// Level or `EnvFilter` directives, e.g. `info,locus_axum=debug`.
    /// `RUST_LOG` takes precedence when set.
    level: String,
    console: bool,
    file: bool,
    /// Number of newest log files kept by the cleanup task.
    max_files: Option<i16>,
    cleanup_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            console: true,
            file: true,
            max_files: None,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

/// The `log:` section of the application config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub console: bool,
    pub file: bool,
    pub dir: PathBuf,
    pub file_prefix: String,
    pub max_files: Option<i16>,
    pub time_format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            console: true,
            file: false,
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            max_files: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl From<LogSettings> for LoggerConfig {
    fn from(settings: LogSettings) -> Self {
        let config = LoggerConfig::new()
            .level(settings.level)
            .enable_console(settings.console)
            .enable_file(settings.file)
            .log_dir(settings.dir)
            .file_prefix(settings.file_prefix)
            .time_format(settings.time_format);
        match settings.max_files {
            Some(count) => config.max_files(count),
            None => config,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    pub fn max_files(mut self, count: i16) -> Self {
        self.max_files = Some(count);
        self
    }

    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Installs the global subscriber and starts the cleanup task if
    /// `max_files` is set.
    ///
    /// Hold on to the returned guard: dropping it stops the file writer and
    /// loses buffered lines.
    pub fn init(self) -> Result<Option<WorkerGuard>, TryInitError> {
        let console_layer = self.build_console_layer();
        let (file_layer, guard) = self.build_file_layer();

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        self.spawn_cleanup_task_if_needed();

        Ok(guard)
    }

    /// Each layer gets its own filter; `EnvFilter` is not `Clone`.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }

    fn build_console_layer<S>(&self) -> Option<impl Layer<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
                .with_filter(self.filter())
        })
    }

    fn build_file_layer<S>(&self) -> (Option<impl Layer<S>>, Option<WorkerGuard>)
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.file {
            return (None, None);
        }

        let file_appender = tracing_appender::rolling::daily(&self.log_dir, &self.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(self.time_format.clone()))
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(self.filter());

        (Some(layer), Some(guard))
    }

    fn spawn_cleanup_task_if_needed(&self) {
        let Some(max_files) = self.max_files else {
            return;
        };
        if !self.file {
            return;
        }

        let log_dir = self.log_dir.clone();
        let file_prefix = self.file_prefix.clone();
        let interval = self.cleanup_interval;
        let keep = usize::try_from(max_files).unwrap_or(0);

        std::thread::spawn(move || {
            loop {
                cleanup_old_logs(&log_dir, &file_prefix, keep);
                std::thread::sleep(interval);
            }
        });
    }
}

/// Keeps the `max_files` newest files starting with `file_prefix`.
///
/// Relies on the appender's ISO date suffix sorting lexicographically.
fn cleanup_old_logs(log_dir: &Path, file_prefix: &str, max_files: usize) {
    if !log_dir.exists() {
        return;
    }

    let read_dir = match std::fs::read_dir(log_dir) {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to read log directory: {}", e);
            return;
        }
    };

    let mut log_files: Vec<_> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let file_name = entry.file_name().into_string().ok()?;
            file_name.starts_with(file_prefix).then_some((entry, file_name))
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    for (entry, _) in log_files.iter().skip(max_files) {
        if let Err(e) = std::fs::remove_file(entry.path()) {
            error!("Failed to remove old log file {:?}: {}", entry.path(), e);
        }
    }
}
