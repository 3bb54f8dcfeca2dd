//! Error types for site configuration assembly.

use crate::rewrite::RewriteError;

/// Error returned when the site configuration cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Navigation was requested for a locale nobody registered.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
    /// A rewrite rule is malformed.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// An `activeMatch` pattern is not a valid regex.
    #[error("Invalid activeMatch pattern '{pattern}': {source}")]
    ActiveMatch {
        /// Pattern as written.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// A `srcExclude` entry is not a valid glob.
    #[error("Invalid srcExclude pattern '{pattern}': {source}")]
    Exclude {
        /// Pattern as written.
        pattern: String,
        /// Glob compilation error.
        #[source]
        source: glob::PatternError,
    },
}
