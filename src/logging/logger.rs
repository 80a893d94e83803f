//! Logger handle - console output settings shared with the subscriber.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::common::config::{DEFAULT_CALLER_WIDTH, DEFAULT_LEVEL_WIDTH};
use crate::common::{Error, Result};
use crate::logging::format::ColumnFormat;
use crate::logging::level::Severity;

/// Console logger settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Events below this severity are dropped.
    pub level: Severity,
    /// Width of the `[LEVEL]` column.
    pub level_width: usize,
    /// Width of the `file:line` column.
    pub caller_width: usize,
    /// Color the level label with ANSI escapes.
    pub color: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Severity::Debug,
            level_width: DEFAULT_LEVEL_WIDTH,
            caller_width: DEFAULT_CALLER_WIDTH,
            color: true,
        }
    }
}

/// Handle to the console logger.
///
/// Created once at startup and cloned wherever settings need to change.
/// Every clone shares one set of [`LogSettings`] behind a mutex, which the
/// formatter and the level filter read on each event.
///
/// # Usage
/// ```no_run
/// use bptree::logging::{LogSettings, Logger, Severity};
///
/// let logger = Logger::new(LogSettings::default());
/// logger.install().unwrap();
///
/// tracing::info!("Hello World");
/// logger.set_level(Severity::Warn);
/// tracing::info!("dropped");
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    settings: Arc<Mutex<LogSettings>>,
}

impl Logger {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> LogSettings {
        *self.settings.lock()
    }

    /// Set the minimum severity.
    pub fn set_level(&self, level: Severity) {
        self.settings.lock().level = level;
    }

    /// Toggle colored level labels.
    pub fn set_color_enabled(&self, enabled: bool) {
        self.settings.lock().color = enabled;
    }

    /// Set column widths. A zero leaves that width unchanged.
    pub fn set_column_widths(&self, level_width: usize, caller_width: usize) {
        let mut settings = self.settings.lock();
        if level_width > 0 {
            settings.level_width = level_width;
        }
        if caller_width > 0 {
            settings.caller_width = caller_width;
        }
    }

    /// Whether events of `severity` pass the current minimum level.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.settings.lock().level
    }

    /// Build a layer that writes formatted, filtered events to `make_writer`.
    pub fn layer<S, W>(&self, make_writer: W) -> impl Layer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let gate = self.clone();
        tracing_subscriber::fmt::layer()
            .event_format(ColumnFormat::new(Arc::clone(&self.settings)))
            .with_writer(make_writer)
            // The level can change at runtime, so it is checked per event.
            .with_filter(filter::dynamic_filter_fn(
                move |metadata: &Metadata<'_>, _cx: &Context<'_, S>| gate.enabled(Severity::of(metadata)),
            ))
    }

    /// Install this logger as the global default subscriber, writing to
    /// stdout.
    ///
    /// # Errors
    /// - `Error::LoggerInit` if a global subscriber is already set
    pub fn install(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.layer(std::io::stdout))
            .try_init()
            .map_err(|e| Error::LoggerInit(e.to_string()))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogSettings::default())
    }
}
