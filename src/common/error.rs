//! Error types for bptree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in bptree.
///
/// The tree's `insert` and `search` never fail; errors only come from
/// configuration, logger setup and structural validation.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested order is below the supported minimum.
    ///
    /// Only returned by the fail-fast constructor; `BPlusTree::new` clamps.
    #[error("invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {name}: {message}")]
    InvalidConfig { name: String, message: String },

    /// A log level name that is not one of debug/info/warn/error/fatal.
    #[error("unknown log level: {0}")]
    InvalidLevel(String),

    /// A global subscriber was already installed.
    #[error("failed to install logger: {0}")]
    LoggerInit(String),

    /// The tree breaks one of its structural invariants.
    ///
    /// This indicates a bug - a correct tree never reports it.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
