//! The application intake conversation as an explicit state machine.
//!
//! A [`FlowSession`] holds everything one applicant has chosen so far and the
//! step the conversation is in. Steps advance only through [`FlowSession::apply`],
//! which rejects events that do not fit the current state. Sessions are rebuilt
//! from component tokens on every round trip via [`FlowSession::restore`], so the
//! same validation runs whether an event comes from a live wait or a decoded token.

use std::fmt;

use crate::error::flow::TransitionError;
use crate::model::intake::{Game, Language, Region, RiotId};
use crate::service::application::token::{IntakeChoice, IntakeToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    LanguageSelect,
    GameSelect,
    RegionSelect,
    IdentityModal,
    RankCheck,
    BackendSubmit,
    ChannelProvision,
    NameCollection,
    TermsCollection,
    Complete,
    Cancelled,
    TimedOut,
    Failed,
}

impl FlowState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Complete | Self::Cancelled | Self::TimedOut | Self::Failed
        )
    }

    /// States that wait on user input and may therefore time out.
    pub fn is_waiting(self) -> bool {
        matches!(
            self,
            Self::LanguageSelect
                | Self::GameSelect
                | Self::RegionSelect
                | Self::IdentityModal
                | Self::NameCollection
                | Self::TermsCollection
        )
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    LanguageChosen(Language),
    GameChosen(Game),
    RegionChosen(Region),
    IdentitySubmitted(RiotId),
    RankAccepted(String),
    RankRejected(String),
    RankLookupFailed,
    Submitted,
    SubmitFailed,
    ChannelCreated(u64),
    ChannelFailed,
    NameReceived(String),
    TermsAgreed,
    TimedOut,
    Cancel,
}

impl FlowEvent {
    fn name(&self) -> String {
        match self {
            Self::LanguageChosen(language) => format!("LanguageChosen({})", language.code()),
            Self::GameChosen(game) => format!("GameChosen({})", game.api_name()),
            Self::RegionChosen(region) => format!("RegionChosen({})", region.code()),
            Self::IdentitySubmitted(_) => "IdentitySubmitted".to_string(),
            Self::RankAccepted(_) => "RankAccepted".to_string(),
            Self::RankRejected(_) => "RankRejected".to_string(),
            Self::RankLookupFailed => "RankLookupFailed".to_string(),
            Self::Submitted => "Submitted".to_string(),
            Self::SubmitFailed => "SubmitFailed".to_string(),
            Self::ChannelCreated(_) => "ChannelCreated".to_string(),
            Self::ChannelFailed => "ChannelFailed".to_string(),
            Self::NameReceived(_) => "NameReceived".to_string(),
            Self::TermsAgreed => "TermsAgreed".to_string(),
            Self::TimedOut => "TimedOut".to_string(),
            Self::Cancel => "Cancel".to_string(),
        }
    }
}

/// One applicant's traversal of the intake conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSession {
    pub user_id: u64,
    pub language: Option<Language>,
    pub game: Option<Game>,
    pub region: Option<Region>,
    pub riot_id: Option<RiotId>,
    pub rank: Option<String>,
    pub channel_id: Option<u64>,
    pub display_name: Option<String>,
    pub terms_agreed: bool,
    state: FlowState,
}

impl FlowSession {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            language: None,
            game: None,
            region: None,
            riot_id: None,
            rank: None,
            channel_id: None,
            display_name: None,
            terms_agreed: false,
            state: FlowState::LanguageSelect,
        }
    }

    /// Rebuilds a session from a decoded token by replaying its choices.
    ///
    /// A `Start` token resumes at [`FlowState::NameCollection`] in `channel_id`,
    /// since the backend record and channel already exist by then.
    ///
    /// # Arguments
    /// - `user_id` - The user who pressed the component
    /// - `token` - Decoded custom ID
    /// - `channel_id` - Channel the component was pressed in
    ///
    /// # Returns
    /// - `Ok(FlowSession)` - Session positioned after the token's last choice
    /// - `Err(TransitionError)` - The token encodes a choice the flow does not accept,
    ///   such as a game closed for applications
    pub fn restore(
        user_id: u64,
        token: &IntakeToken,
        channel_id: u64,
    ) -> Result<Self, TransitionError> {
        let mut session = Self::new(user_id);

        match *token {
            IntakeToken::Default | IntakeToken::Special => {}
            IntakeToken::Language(language) => {
                session.apply(FlowEvent::LanguageChosen(language))?;
            }
            IntakeToken::Game { language, game } => {
                session.apply(FlowEvent::LanguageChosen(language))?;
                session.apply(FlowEvent::GameChosen(game))?;
            }
            IntakeToken::Region(choice) => {
                session.replay_choice(choice)?;
            }
            IntakeToken::Start { choice, .. } => {
                session.replay_choice(choice)?;
                session.channel_id = Some(channel_id);
                session.state = FlowState::NameCollection;
            }
        }

        Ok(session)
    }

    fn replay_choice(&mut self, choice: IntakeChoice) -> Result<(), TransitionError> {
        self.apply(FlowEvent::LanguageChosen(choice.language))?;
        self.apply(FlowEvent::GameChosen(choice.game))?;
        self.apply(FlowEvent::RegionChosen(choice.region))?;
        Ok(())
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Fails unless the session is currently in `expected`.
    pub fn expect_state(&self, expected: FlowState) -> Result<(), TransitionError> {
        if self.state == expected {
            return Ok(());
        }

        Err(TransitionError {
            state: self.state.to_string(),
            event: format!("{} step", expected),
        })
    }

    /// Language for prompts; English until one is chosen.
    pub fn language_or_default(&self) -> Language {
        self.language.unwrap_or(Language::En)
    }

    /// The language, game and region once all three are chosen.
    pub fn choice(&self) -> Option<IntakeChoice> {
        Some(IntakeChoice {
            language: self.language?,
            game: self.game?,
            region: self.region?,
        })
    }

    /// Applies an event and moves to the next state.
    ///
    /// # Returns
    /// - `Ok(FlowState)` - The new state
    /// - `Err(TransitionError)` - The event is not valid in the current state; the
    ///   session is left unchanged
    pub fn apply(&mut self, event: FlowEvent) -> Result<FlowState, TransitionError> {
        use FlowState as S;

        let next = match (self.state, &event) {
            (state, FlowEvent::Cancel) if !state.is_terminal() => S::Cancelled,
            (state, FlowEvent::TimedOut) if state.is_waiting() => S::TimedOut,

            (S::LanguageSelect, FlowEvent::LanguageChosen(language)) => {
                self.language = Some(*language);
                S::GameSelect
            }
            (S::GameSelect, FlowEvent::GameChosen(game)) if game.is_open_for_applications() => {
                self.game = Some(*game);
                S::RegionSelect
            }
            (S::RegionSelect, FlowEvent::RegionChosen(region)) => {
                self.region = Some(*region);
                S::IdentityModal
            }
            (S::IdentityModal, FlowEvent::IdentitySubmitted(riot_id)) => {
                self.riot_id = Some(riot_id.clone());
                S::RankCheck
            }
            (S::RankCheck, FlowEvent::RankAccepted(rank)) => {
                self.rank = Some(rank.clone());
                S::BackendSubmit
            }
            (S::RankCheck, FlowEvent::RankRejected(rank)) => {
                self.rank = Some(rank.clone());
                S::Failed
            }
            (S::RankCheck, FlowEvent::RankLookupFailed) => S::Failed,
            (S::BackendSubmit, FlowEvent::Submitted) => S::ChannelProvision,
            (S::BackendSubmit, FlowEvent::SubmitFailed) => S::Failed,
            (S::ChannelProvision, FlowEvent::ChannelCreated(channel_id)) => {
                self.channel_id = Some(*channel_id);
                S::NameCollection
            }
            (S::ChannelProvision, FlowEvent::ChannelFailed) => S::Failed,
            (S::NameCollection, FlowEvent::NameReceived(name)) => {
                self.display_name = Some(name.clone());
                S::TermsCollection
            }
            (S::TermsCollection, FlowEvent::TermsAgreed) => {
                self.terms_agreed = true;
                S::Complete
            }
            (state, event) => {
                return Err(TransitionError {
                    state: state.to_string(),
                    event: event.name(),
                })
            }
        };

        tracing::debug!(
            "Intake flow for user {}: {} --{}--> {}",
            self.user_id,
            self.state,
            event.name(),
            next
        );
        self.state = next;

        Ok(next)
    }
}
