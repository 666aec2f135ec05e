//! Error types and user-facing error reporting.
//!
//! This module provides the bot's error hierarchy. `AppError` is the top-level
//! error type wrapping the domain-specific errors, and `AppError::user_message`
//! maps each variant to the text shown back to the Discord user. Unexpected
//! failures are logged in full and answered with a generic message so internal
//! details never reach a channel.

pub mod config;
pub mod flow;
pub mod internal;
pub mod validation;

use thiserror::Error;

use crate::error::{
    config::ConfigError,
    flow::{ApiError, IntakeError, RankLookupError, TokenError, TransitionError},
    internal::InternalError,
    validation::ValidationError,
};

/// Generic reply for failures whose details stay in the operator log.
pub const GENERIC_FAILURE: &str = "Something went wrong while handling this request.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic conversion so handlers can propagate with `?` and report
/// once at the edge.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Backend application API error.
    #[error(transparent)]
    ApiErr(#[from] ApiError),

    /// Rank oracle error.
    #[error(transparent)]
    RankErr(#[from] RankLookupError),

    /// Intake conversation step failure.
    #[error(transparent)]
    IntakeErr(#[from] IntakeError),

    /// Malformed component custom ID.
    #[error(transparent)]
    TokenErr(#[from] TokenError),

    /// Intake flow received an event it cannot accept in its current state.
    #[error(transparent)]
    TransitionErr(#[from] TransitionError),

    /// User input failed validation.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Unexpected internal state.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found error.
    ///
    /// The message is shown to the user as-is.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// The message is shown to the user as-is.
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic message is shown to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into text suitable for a Discord reply.
    ///
    /// Input validation, not-found and bad-request errors carry messages meant
    /// for the user. Everything else is logged at error level and replaced with
    /// [`GENERIC_FAILURE`].
    ///
    /// # Returns
    /// - `String` - Message safe to show in a channel or ephemeral reply
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::ValidationErr(err) => err.to_string(),
            Self::TokenErr(err) => {
                tracing::warn!("Rejected malformed custom id: {}", err);
                "This button is no longer valid.".to_string()
            }
            err => {
                tracing::error!("{}", err);
                GENERIC_FAILURE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that user-facing variants keep their message.
    ///
    /// Expected: NotFound and validation messages pass through unchanged
    #[test]
    fn passes_through_user_facing_messages() {
        assert_eq!(
            AppError::NotFound("Application not found.".to_string()).user_message(),
            "Application not found."
        );
        assert_eq!(
            AppError::from(ValidationError::MissingEmbed).user_message(),
            "No embed found in the message"
        );
    }

    /// Tests that internal failures are hidden behind the generic message.
    ///
    /// Expected: the generic failure text instead of the internal detail
    #[test]
    fn hides_internal_details() {
        let err = AppError::InternalError("row 12 has a corrupt snowflake".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = AppError::from(ApiError::UnexpectedStatus {
            status: 500,
            message: None,
        });
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
