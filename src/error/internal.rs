use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Stored Discord snowflakes are kept as strings; failing to parse one back means
    /// the row was written by something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored enum column holds a value outside its closed set.
    #[error("Unknown {column} value '{value}' in database row")]
    UnknownEnumValue {
        /// Column the value was read from
        column: &'static str,
        /// The unexpected value
        value: String,
    },
}
