use thiserror::Error;

use crate::error::GENERIC_FAILURE;
use crate::model::intake::Language;
use crate::util::i18n::{render, Msg, Placeholder};

/// Failure to decode state carried in a component custom ID.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Custom ID '{0}' does not belong to this component")]
    Namespace(String),

    #[error("Custom ID '{0}' has an unexpected number of segments")]
    Arity(String),

    #[error("Unknown {kind} '{value}' in custom ID")]
    UnknownValue {
        /// Which segment failed (language, game, region, ...)
        kind: &'static str,
        /// Raw segment value
        value: String,
    },
}

/// An event was applied to an intake session in a state that cannot accept it.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Cannot apply {event} while in {state}")]
pub struct TransitionError {
    pub state: String,
    pub event: String,
}

/// Failure of the external backend API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered, but not with the status the operation requires.
    #[error("API responded with status: {status}")]
    UnexpectedStatus {
        status: u16,
        /// Error text extracted from the response body, if any
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Failure to look up a competitive rank.
#[derive(Error, Debug)]
pub enum RankLookupError {
    #[error("Player {0} was not found")]
    PlayerNotFound(String),

    #[error("Player {0} has no ranked data")]
    Unranked(String),

    #[error("No rank lookup is configured for {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A step of the intake conversation failed and the flow halted.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The applicant's rank is below the minimum for the game.
    #[error("Rank {0} does not meet the minimum requirement")]
    RankTooLow(String),

    #[error(transparent)]
    RankLookup(#[from] RankLookupError),

    /// `POST /apply` answered with anything other than 201.
    #[error("Application API responded with status: {status}")]
    SubmitRejected {
        status: u16,
        /// Error text extracted from the response body, if any
        message: Option<String>,
    },

    /// A backend call failed before or without a usable response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The application channel could not be created; the backend record was
    /// marked rejected.
    #[error("Application channel could not be created: {0}")]
    ChannelFailed(String),

    /// The session reached a step without the data earlier steps collect.
    #[error("Intake session is missing its {0}")]
    Incomplete(&'static str),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl IntakeError {
    /// Localized text shown to the applicant for this failure.
    pub fn localized(&self, lang: Language) -> String {
        match self {
            Self::RankTooLow(rank) => render(lang, Msg::RankRejected, &[(Placeholder::Rank, rank)]),
            Self::RankLookup(_) => render(lang, Msg::RankLookupFailed, &[]),
            Self::SubmitRejected { status, .. } => render(
                lang,
                Msg::SubmitRejected,
                &[(Placeholder::Status, &status.to_string())],
            ),
            Self::Api(err) => {
                render(lang, Msg::SubmitError, &[(Placeholder::Error, &err.to_string())])
            }
            Self::ChannelFailed(_) => render(lang, Msg::ChannelFailed, &[]),
            Self::Incomplete(_) | Self::Transition(_) => GENERIC_FAILURE.to_string(),
        }
    }
}
