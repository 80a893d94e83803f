//! Log severities.

use std::fmt;
use std::str::FromStr;

use tracing::{Level, Metadata};

use crate::common::Error;

/// Field that marks an ERROR event as fatal. Set by [`crate::fatal!`].
pub const FATAL_FIELD: &str = "fatal";

// ANSI color codes
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_GRAY: &str = "\x1b[90m";
const COLOR_GREEN: &str = "\x1b[32m";
const COLOR_YELLOW: &str = "\x1b[33m";
const COLOR_RED: &str = "\x1b[31m";
const COLOR_MAGENTA: &str = "\x1b[35m";

/// Log severity, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    /// An error after which the process exits.
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Severity of a `tracing` callsite.
    ///
    /// TRACE folds into Debug. An ERROR callsite declaring the
    /// [`FATAL_FIELD`] field is Fatal.
    pub fn of(metadata: &Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::ERROR if metadata.fields().field(FATAL_FIELD).is_some() => Severity::Fatal,
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warn,
            Level::INFO => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// Upper-case label shown in the level column.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Severity::Debug => COLOR_GRAY,
            Severity::Info => COLOR_GREEN,
            Severity::Warn => COLOR_YELLOW,
            Severity::Error => COLOR_RED,
            Severity::Fatal => COLOR_MAGENTA,
        }
    }

    /// Wrap `text` in this severity's color, or return it as is.
    pub fn colorize(self, text: &str, use_color: bool) -> String {
        if use_color {
            format!("{}{}{}", self.color(), text, COLOR_RESET)
        } else {
            text.to_string()
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Severity::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!(" Info ".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!(matches!("verbose".parse::<Severity>(), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_colorize() {
        assert_eq!(Severity::Info.colorize("INFO ", false), "INFO ");
        assert_eq!(Severity::Info.colorize("INFO ", true), "\x1b[32mINFO \x1b[0m");
        assert_eq!(Severity::Fatal.colorize("FATAL", true), "\x1b[35mFATAL\x1b[0m");
    }

    #[test]
    fn test_display_matches_label() {
        for level in Severity::ALL {
            assert_eq!(level.to_string(), level.label());
        }
    }
}
