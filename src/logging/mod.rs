//! Console logging.
//!
//! Code logs through the `tracing` macros. This module provides the console
//! backend: a [`Logger`] handle whose [`Logger::layer`] plugs into a
//! `tracing-subscriber` registry and prints column-aligned lines:
//!
//! ```text
//! <timestamp> [LEVEL] file.rs:line             message key=value
//! ```
//!
//! # Components
//! - [`Logger`] / [`LogSettings`] - Minimum level, column widths, color
//! - [`Severity`] - DEBUG < INFO < WARN < ERROR < FATAL
//! - [`fatal!`](crate::fatal) - Log at FATAL and exit the process

mod format;
mod level;
mod logger;

pub use level::{Severity, FATAL_FIELD};
pub use logger::{LogSettings, Logger};

/// Log an error marked fatal, then exit the process with status 1.
///
/// Takes the same arguments as `tracing::error!`.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {{
        $crate::__tracing::error!(fatal = true, $($arg)+);
        ::std::process::exit(1)
    }};
}
