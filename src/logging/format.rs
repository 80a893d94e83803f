//! Column-aligned event formatter.
//!
//! Layout of one line:
//! ```text
//! 2025-09-21T16:29:03.123456Z [INFO ] main.rs:42                Hello World
//! └──────── timestamp ──────┘ └level┘ └──── caller column ────┘ └ message ┘
//! ```

use std::fmt::{self, Write as _};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::logging::level::{Severity, FATAL_FIELD};
use crate::logging::LogSettings;

/// Formats events using the settings of a [`crate::logging::Logger`].
///
/// Settings are read on every event, so changes through the logger handle
/// apply to the next line.
pub(crate) struct ColumnFormat {
    settings: Arc<Mutex<LogSettings>>,
}

impl ColumnFormat {
    pub fn new(settings: Arc<Mutex<LogSettings>>) -> Self {
        Self { settings }
    }
}

impl<S, N> FormatEvent<S, N> for ColumnFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let settings = *self.settings.lock();
        let metadata = event.metadata();
        let severity = Severity::of(metadata);

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = format!("{:<width$}", severity.label(), width = settings.level_width);
        let caller = fit_width(&caller_of(metadata), settings.caller_width);

        SystemTime.format_time(&mut writer)?;
        writeln!(
            writer,
            " [{}] {} {}{}",
            severity.colorize(&level, settings.color),
            caller,
            visitor.message,
            visitor.fields
        )
    }
}

/// `file:line` of the callsite, file name only.
fn caller_of(metadata: &Metadata<'_>) -> String {
    match (metadata.file(), metadata.line()) {
        (Some(file), Some(line)) => {
            let base = Path::new(file)
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| file.into());
            format!("{base}:{line}")
        }
        _ => "???".to_string(),
    }
}

/// Left-align `s` in a column of `width` characters, cutting off the end if
/// it does not fit. A zero width leaves `s` untouched.
pub(crate) fn fit_width(s: &str, width: usize) -> String {
    if width == 0 {
        return s.to_string();
    }
    if s.chars().count() > width {
        return s.chars().take(width).collect();
    }
    format!("{s:<width$}")
}

/// Collects the message and renders other fields as ` key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            FATAL_FIELD => {}
            name => {
                let _ = write!(self.fields, " {name}={value}");
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{value:?}");
            }
            FATAL_FIELD => {}
            name => {
                let _ = write!(self.fields, " {name}={value:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_pads_short() {
        assert_eq!(fit_width("main.rs:7", 12), "main.rs:7   ");
    }

    #[test]
    fn test_fit_width_truncates_long() {
        assert_eq!(fit_width("a_very_long_file_name.rs:123", 10), "a_very_lon");
    }

    #[test]
    fn test_fit_width_counts_chars_not_bytes() {
        assert_eq!(fit_width("树.rs:1", 4), "树.rs");
        assert_eq!(fit_width("树", 3), "树  ");
    }

    #[test]
    fn test_fit_width_zero_is_passthrough() {
        assert_eq!(fit_width("tree.rs:10", 0), "tree.rs:10");
    }
}
