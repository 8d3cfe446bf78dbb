//! # Logger
//!
//! Installs the global `tracing` subscriber for the recap binaries.
//!
//! Console output always goes to stderr so that command line runs can print
//! reports on stdout untouched. An optional rolling file layer writes plain
//! text or JSON through a non-blocking worker.
//!
//! ```rust
//! # use recap_logger::{LevelFilter, Logger};
//! let _logger = Logger::builder()
//!     .name("recap-doc")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
struct Settings {
    console: bool,
    ansi: bool,
    level: LevelFilter,
    directives: Option<String>,
    dir: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            ansi: true,
            level: LevelFilter::INFO,
            directives: None,
            dir: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

mod sealed {
    pub trait State {}
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFile;

impl sealed::State for Unnamed {}
impl sealed::State for Named {}
impl sealed::State for ConsoleOnly {}
impl sealed::State for WithFile {}

/// Builder for the global subscriber. A name is required before `init`; file
/// options only exist once a directory has been given.
#[derive(Debug)]
pub struct LoggerBuilder<N: sealed::State = Unnamed, F: sealed::State = ConsoleOnly> {
    settings: Settings,
    name: N,
    output: PhantomData<F>,
}

impl<F: sealed::State> LoggerBuilder<Unnamed, F> {
    /// Sets the service name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), output: PhantomData }
    }
}

impl<F: sealed::State> LoggerBuilder<Named, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Extra `EnvFilter` directives such as `recap_news=debug,hyper=warn`.
    ///
    /// `RUST_LOG` is only consulted when no directives are given.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        let directives = directives.into();
        self.settings.directives = (!directives.trim().is_empty()).then_some(directives);
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    #[must_use]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.settings.ansi = enabled;
        self
    }

    /// Adds a rolling file layer writing into `dir`.
    pub fn directory(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFile> {
        let mut settings = self.settings;
        settings.dir = Some(dir.into());
        LoggerBuilder { settings, name: self.name, output: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file worker guard and must outlive all logging.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber already exists,
    /// [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    /// bad directives or no enabled output.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name), .. } = self;
        if name.trim().is_empty() {
            return Err(LoggerError::invalid("Logger name cannot be empty"));
        }
        if settings.max_files == 0 {
            return Err(LoggerError::invalid("max_files must be greater than zero"));
        }

        let filter = env_filter(&settings)?;
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if settings.console {
            layers.push(
                fmt::layer()
                    .compact()
                    .with_ansi(settings.ansi)
                    .with_writer(std::io::stderr)
                    .boxed(),
            );
        }

        let guard = match &settings.dir {
            Some(dir) => {
                let (layer, guard) = file_layer(&name, dir, &settings)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid(
                "No logging output enabled; enable the console or a log directory",
            ));
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { name, guard })
    }
}

impl LoggerBuilder<Named, WithFile> {
    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Writes file records as JSON lines.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

/// Handle to the installed subscriber. Dropping it flushes the file worker.
#[must_use = "dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed, output: PhantomData }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a file layer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!(logger = %self.name, "Flushing log files");
        }
    }
}

/// Parses a level name (`trace`..`error`, `off`), case-insensitive.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(value: &str) -> Result<LevelFilter, LoggerError> {
    value
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggerError::invalid(format!("Unknown log level '{value}'")))
}

/// Parses a rotation name: `minutely`, `hourly`, `daily` or `never`.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_rotation(value: &str) -> Result<Rotation, LoggerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => Err(LoggerError::invalid(format!("Unknown log rotation '{other}'"))),
    }
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.directives {
        Some(directives) => builder
            .parse(directives)
            .map_err(|e| LoggerError::invalid(format!("Invalid filter '{directives}': {e}"))),
        None => Ok(builder.from_env_lossy()),
    }
}

fn file_layer(
    name: &str,
    dir: &Path,
    settings: &Settings,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(dir).context(format!("creating {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(settings.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(settings.max_files)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if settings.json { layer.json().boxed() } else { layer.boxed() };

    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_with_console_at_info() {
        let builder = Logger::builder().name("recap-test");
        assert!(builder.settings.console);
        assert!(builder.settings.dir.is_none());
        assert_eq!(builder.settings.level, LevelFilter::INFO);
    }

    #[test]
    fn blank_directives_are_ignored() {
        let builder = Logger::builder().name("recap-test").directives("   ");
        assert!(builder.settings.directives.is_none());
    }

    #[test]
    fn file_options_are_recorded() {
        let builder = Logger::builder()
            .name("recap-test")
            .directory("logs")
            .rotation(Rotation::HOURLY)
            .max_files(3)
            .json(true);

        assert_eq!(builder.settings.dir.as_deref(), Some(std::path::Path::new("logs")));
        assert_eq!(builder.settings.max_files, 3);
        assert!(builder.settings.json);
    }

    #[test]
    fn zero_max_files_is_rejected_before_install() {
        let err =
            Logger::builder().name("recap-test").directory("logs").max_files(0).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn disabled_outputs_are_rejected() {
        let err = Logger::builder().name("recap-test").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn bad_directives_are_rejected() {
        let err = Logger::builder().name("recap-test").directives("recap=loudest").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn level_and_rotation_names_parse() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(parse_level("loud").is_err());

        assert_eq!(parse_rotation("Hourly").unwrap(), Rotation::HOURLY);
        assert_eq!(parse_rotation("never").unwrap(), Rotation::NEVER);
        assert!(parse_rotation("fortnightly").is_err());
    }
}
