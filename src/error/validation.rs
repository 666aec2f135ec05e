use thiserror::Error;

/// User supplied input that failed validation.
///
/// These are reported inline to the user and halt the current step; nothing is
/// retried automatically.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Riot identifiers must look like `name#tag`.
    #[error("'{0}' is not a valid name#tag identifier")]
    InvalidRiotId(String),

    /// Message link does not point at a Discord message.
    #[error("'{0}' is not a valid Discord message link")]
    InvalidMessageLink(String),

    /// The referenced message has no embed to read an application from.
    #[error("No embed found in the message")]
    MissingEmbed,

    /// A required application field was absent from the source.
    #[error("Missing application field: {0}")]
    MissingField(&'static str),

    /// A field holds a value outside its allowed set or format.
    #[error("Invalid value '{value}' for {field}")]
    InvalidField {
        /// Name of the field
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// A free-text field is shorter or longer than allowed.
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        /// Name of the field
        field: &'static str,
        /// Minimum accepted length
        min: usize,
        /// Maximum accepted length
        max: usize,
    },
}
