//! Side-effecting steps of the intake conversation.
//!
//! Each step talks to the rank oracle or the booster backend, then feeds the
//! outcome into the session's state machine. Submission and channel creation form
//! a small saga: a backend record whose channel cannot be created is marked
//! rejected again so the applicant is not left with an orphaned application.

use serenity::async_trait;

use crate::error::{flow::IntakeError, AppError};
use crate::model::intake::Language;
use crate::model::profile::{ApplyRequest, ProfileUpdate};
use crate::service::application::{
    api::BoosterApi,
    flow::{FlowEvent, FlowSession, FlowState},
    oracle::RankOracle,
    rank::meets_requirement,
    token::IntakeChoice,
};
use crate::util::i18n::terms_phrase;

const APPLICATION_TYPE: &str = "default";

/// Creates the private channel an applicant continues the conversation in.
#[async_trait]
pub trait ChannelProvisioner: Send + Sync {
    /// Creates `<username>-application`, posts the welcome message with a *Start*
    /// button bound to the applicant, and returns the new channel id.
    async fn create_application_channel(
        &self,
        applicant_id: u64,
        username: &str,
        choice: IntakeChoice,
    ) -> Result<u64, AppError>;
}

pub struct IntakeService<'a> {
    api: &'a dyn BoosterApi,
    oracle: &'a dyn RankOracle,
}

impl<'a> IntakeService<'a> {
    pub fn new(api: &'a dyn BoosterApi, oracle: &'a dyn RankOracle) -> Self {
        Self { api, oracle }
    }

    /// Looks up the applicant's rank and applies the minimum-rank policy.
    ///
    /// # Arguments
    /// - `session` - Session in [`FlowState::RankCheck`]
    ///
    /// # Returns
    /// - `Ok(String)` - The accepted rank; the session moves to `BackendSubmit`
    /// - `Err(IntakeError::RankTooLow)` - Rank below the minimum; the session failed
    /// - `Err(IntakeError::RankLookup)` - The oracle could not produce a rank
    pub async fn check_rank(&self, session: &mut FlowSession) -> Result<String, IntakeError> {
        session.expect_state(FlowState::RankCheck)?;
        let (Some(game), Some(riot_id)) = (session.game, session.riot_id.clone()) else {
            return Err(IntakeError::Incomplete("riot id"));
        };

        let rank = match self.oracle.lookup(game, &riot_id).await {
            Ok(rank) => rank,
            Err(err) => {
                tracing::warn!("Rank lookup for {} failed: {}", riot_id, err);
                session.apply(FlowEvent::RankLookupFailed)?;
                return Err(err.into());
            }
        };

        if !meets_requirement(game, &rank) {
            tracing::info!(
                "Rejected application from user {}: rank {} too low for {}",
                session.user_id,
                rank,
                game.display_name()
            );
            session.apply(FlowEvent::RankRejected(rank.clone()))?;
            return Err(IntakeError::RankTooLow(rank));
        }

        session.apply(FlowEvent::RankAccepted(rank.clone()))?;

        Ok(rank)
    }

    /// Records the application with the backend, then provisions its channel.
    ///
    /// Only a 201 response counts as a created application. When the channel cannot
    /// be created the record is patched to `rejected` with a review note explaining
    /// why, and the flow fails.
    ///
    /// # Arguments
    /// - `session` - Session in [`FlowState::BackendSubmit`]
    /// - `provisioner` - Creates the applicant's channel
    /// - `username` - Applicant's username, used for the channel name
    ///
    /// # Returns
    /// - `Ok(u64)` - ID of the new application channel
    /// - `Err(IntakeError)` - Submission or provisioning failed; the session failed
    pub async fn submit_and_provision(
        &self,
        session: &mut FlowSession,
        provisioner: &dyn ChannelProvisioner,
        username: &str,
    ) -> Result<u64, IntakeError> {
        session.expect_state(FlowState::BackendSubmit)?;
        let (Some(choice), Some(rank)) = (session.choice(), session.rank.clone()) else {
            return Err(IntakeError::Incomplete("rank"));
        };

        let request = ApplyRequest {
            discord_id: session.user_id.to_string(),
            game: choice.game.api_name().to_string(),
            application_type: APPLICATION_TYPE.to_string(),
            application_language: choice.language.api_name().to_string(),
            region: choice.region.api_value(choice.game).to_string(),
            rank,
            agreed_to_terms: true,
        };

        let response = match self.api.apply(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Failed to submit application for {}: {}", session.user_id, err);
                session.apply(FlowEvent::SubmitFailed)?;
                return Err(err.into());
            }
        };

        if !response.is_created() {
            tracing::warn!(
                "Application API rejected user {} with status {}: {}",
                session.user_id,
                response.status,
                response.message.as_deref().unwrap_or("no message")
            );
            session.apply(FlowEvent::SubmitFailed)?;
            return Err(IntakeError::SubmitRejected {
                status: response.status,
                message: response.message,
            });
        }
        session.apply(FlowEvent::Submitted)?;

        match provisioner
            .create_application_channel(session.user_id, username, choice)
            .await
        {
            Ok(channel_id) => {
                session.apply(FlowEvent::ChannelCreated(channel_id))?;
                tracing::info!(
                    "Created application channel {} for user {}",
                    channel_id,
                    session.user_id
                );
                Ok(channel_id)
            }
            Err(err) => {
                tracing::error!(
                    "Failed to create application channel for {}: {}",
                    session.user_id,
                    err
                );
                let review = format!("Application channel could not be created: {}", err);
                if let Err(compensation) = self
                    .api
                    .update_profile(session.user_id, &ProfileUpdate::rejected_with_review(review))
                    .await
                {
                    tracing::error!(
                        "Failed to withdraw application of {} after channel failure: {}",
                        session.user_id,
                        compensation
                    );
                }
                session.apply(FlowEvent::ChannelFailed)?;
                Err(IntakeError::ChannelFailed(err.to_string()))
            }
        }
    }

    /// Stores the applicant's full name and moves on to the terms step.
    ///
    /// The session stays in `NameCollection` when the backend update fails.
    pub async fn save_name(
        &self,
        session: &mut FlowSession,
        name: &str,
    ) -> Result<String, IntakeError> {
        session.expect_state(FlowState::NameCollection)?;
        let name = name.trim().to_string();

        self.api
            .update_profile(session.user_id, &ProfileUpdate::custom_name(&*name))
            .await?;
        session.apply(FlowEvent::NameReceived(name.clone()))?;

        Ok(name)
    }

    /// Records that the applicant typed the confirmation phrase.
    ///
    /// The session stays in `TermsCollection` when the backend update fails.
    pub async fn agree_terms(&self, session: &mut FlowSession) -> Result<(), IntakeError> {
        session.expect_state(FlowState::TermsCollection)?;

        self.api
            .update_profile(session.user_id, &ProfileUpdate::agreed_to_terms())
            .await?;
        session.apply(FlowEvent::TermsAgreed)?;

        tracing::info!("User {} completed the application intake", session.user_id);

        Ok(())
    }
}

/// Whether a message accepts the legal terms.
///
/// Surrounding whitespace is ignored; everything else must match exactly.
pub fn terms_match(lang: Language, text: &str) -> bool {
    text.trim() == terms_phrase(lang)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::flow::{ApiError, RankLookupError};
    use crate::model::intake::{Game, Region, RiotId};
    use crate::model::profile::BoosterProfile;
    use crate::service::application::api::ApiResponse;

    #[derive(Default)]
    struct FakeApi {
        apply_status: u16,
        fail_updates: bool,
        applied: Mutex<Vec<ApplyRequest>>,
        updates: Mutex<Vec<(u64, ProfileUpdate)>>,
    }

    impl FakeApi {
        fn with_status(apply_status: u16) -> Self {
            Self {
                apply_status,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl BoosterApi for FakeApi {
        async fn apply(&self, request: &ApplyRequest) -> Result<ApiResponse, ApiError> {
            self.applied.lock().unwrap().push(request.clone());
            Ok(ApiResponse {
                status: self.apply_status,
                message: None,
            })
        }

        async fn update_profile(
            &self,
            discord_id: u64,
            update: &ProfileUpdate,
        ) -> Result<(), ApiError> {
            if self.fail_updates {
                return Err(ApiError::UnexpectedStatus {
                    status: 500,
                    message: None,
                });
            }
            self.updates.lock().unwrap().push((discord_id, update.clone()));
            Ok(())
        }

        async fn get_profile(&self, _discord_id: u64) -> Result<BoosterProfile, ApiError> {
            Ok(BoosterProfile::default())
        }
    }

    struct FakeOracle(Option<&'static str>);

    #[async_trait]
    impl RankOracle for FakeOracle {
        async fn lookup(&self, _game: Game, riot_id: &RiotId) -> Result<String, RankLookupError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| RankLookupError::PlayerNotFound(riot_id.to_string()))
        }
    }

    #[derive(Default)]
    struct FakeProvisioner {
        fail: bool,
        calls: Mutex<Vec<(u64, String)>>,
    }

    #[async_trait]
    impl ChannelProvisioner for FakeProvisioner {
        async fn create_application_channel(
            &self,
            applicant_id: u64,
            username: &str,
            _choice: IntakeChoice,
        ) -> Result<u64, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((applicant_id, username.to_string()));
            if self.fail {
                return Err(AppError::InternalError("Missing Permissions".to_string()));
            }
            Ok(555)
        }
    }

    fn at_rank_check(game: Game) -> FlowSession {
        let mut session = FlowSession::new(42);
        session.apply(FlowEvent::LanguageChosen(Language::En)).unwrap();
        session.apply(FlowEvent::GameChosen(game)).unwrap();
        session.apply(FlowEvent::RegionChosen(Region::Eu)).unwrap();
        session
            .apply(FlowEvent::IdentitySubmitted(RiotId::parse("Ana#EUW").unwrap()))
            .unwrap();
        session
    }

    fn at_backend_submit() -> FlowSession {
        let mut session = at_rank_check(Game::LeagueOfLegends);
        session
            .apply(FlowEvent::RankAccepted("MASTER I (40 LP)".into()))
            .unwrap();
        session
    }

    fn at_name_collection() -> FlowSession {
        let mut session = at_backend_submit();
        session.apply(FlowEvent::Submitted).unwrap();
        session.apply(FlowEvent::ChannelCreated(555)).unwrap();
        session
    }

    /// Tests that an accepted rank advances to submission.
    ///
    /// Expected: Ok(rank), session in BackendSubmit
    #[tokio::test]
    async fn accepts_rank_above_threshold() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(Some("Immortal 2"));
        let mut session = at_rank_check(Game::Valorant);

        let rank = IntakeService::new(&api, &oracle)
            .check_rank(&mut session)
            .await
            .unwrap();

        assert_eq!(rank, "Immortal 2");
        assert_eq!(session.state(), FlowState::BackendSubmit);
    }

    /// Tests that a low rank halts the flow with the rank in the message.
    ///
    /// Expected: Err(RankTooLow), session Failed, message mentions the rank
    #[tokio::test]
    async fn rejects_rank_below_threshold() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(Some("Gold 3"));
        let mut session = at_rank_check(Game::Valorant);

        let err = IntakeService::new(&api, &oracle)
            .check_rank(&mut session)
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::RankTooLow(_)));
        assert!(err.localized(Language::En).contains("Gold 3"));
        assert_eq!(session.state(), FlowState::Failed);
    }

    /// Tests that oracle failures halt the flow.
    ///
    /// Expected: Err(RankLookup), session Failed
    #[tokio::test]
    async fn halts_on_rank_lookup_failure() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(None);
        let mut session = at_rank_check(Game::LeagueOfLegends);

        let err = IntakeService::new(&api, &oracle)
            .check_rank(&mut session)
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::RankLookup(_)));
        assert_eq!(session.state(), FlowState::Failed);
    }

    /// Tests that a 201 response provisions the channel.
    ///
    /// Expected: Ok(channel id), one apply request with mapped region, session in
    /// NameCollection
    #[tokio::test]
    async fn provisions_channel_after_created_response() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(None);
        let provisioner = FakeProvisioner::default();
        let mut session = at_backend_submit();

        let channel_id = IntakeService::new(&api, &oracle)
            .submit_and_provision(&mut session, &provisioner, "ana")
            .await
            .unwrap();

        assert_eq!(channel_id, 555);
        assert_eq!(session.state(), FlowState::NameCollection);
        assert_eq!(session.channel_id, Some(555));
        assert_eq!(*provisioner.calls.lock().unwrap(), vec![(42, "ana".to_string())]);

        let applied = api.applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].region, "euw1");
        assert_eq!(applied[0].application_type, "default");
        assert_eq!(applied[0].application_language, "english");
        assert!(applied[0].agreed_to_terms);
    }

    /// Tests that any status other than 201 halts before provisioning.
    ///
    /// Expected: Err(SubmitRejected) carrying the status, no channel created
    #[tokio::test]
    async fn does_not_provision_without_created_response() {
        for status in [200, 409] {
            let api = FakeApi::with_status(status);
            let oracle = FakeOracle(None);
            let provisioner = FakeProvisioner::default();
            let mut session = at_backend_submit();

            let err = IntakeService::new(&api, &oracle)
                .submit_and_provision(&mut session, &provisioner, "ana")
                .await
                .unwrap_err();

            assert!(matches!(err, IntakeError::SubmitRejected { status: s, .. } if s == status));
            assert!(err.localized(Language::En).contains(&status.to_string()));
            assert!(provisioner.calls.lock().unwrap().is_empty());
            assert_eq!(session.state(), FlowState::Failed);
        }
    }

    /// Tests that a failed channel creation withdraws the backend record.
    ///
    /// Expected: Err(ChannelFailed), one rejected-with-review patch for the applicant
    #[tokio::test]
    async fn compensates_when_channel_creation_fails() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(None);
        let provisioner = FakeProvisioner {
            fail: true,
            ..FakeProvisioner::default()
        };
        let mut session = at_backend_submit();

        let err = IntakeService::new(&api, &oracle)
            .submit_and_provision(&mut session, &provisioner, "ana")
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::ChannelFailed(_)));
        assert_eq!(session.state(), FlowState::Failed);

        let updates = api.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 42);
        assert_eq!(updates[0].1.application_status.as_deref(), Some("rejected"));
        assert!(updates[0]
            .1
            .hr_review
            .as_deref()
            .is_some_and(|review| review.contains("Missing Permissions")));
    }

    /// Tests the name and terms steps against the backend.
    ///
    /// Expected: trimmed name patched, then terms patched, session Complete
    #[tokio::test]
    async fn saves_name_then_terms() {
        let api = FakeApi::with_status(201);
        let oracle = FakeOracle(None);
        let service = IntakeService::new(&api, &oracle);
        let mut session = at_name_collection();

        let name = service.save_name(&mut session, "  Ana Silva \n").await.unwrap();
        assert_eq!(name, "Ana Silva");
        assert_eq!(session.state(), FlowState::TermsCollection);

        service.agree_terms(&mut session).await.unwrap();
        assert_eq!(session.state(), FlowState::Complete);
        assert!(session.terms_agreed);

        let updates = api.updates.lock().unwrap();
        assert_eq!(updates[0].1, ProfileUpdate::custom_name("Ana Silva"));
        assert_eq!(updates[1].1, ProfileUpdate::agreed_to_terms());
    }

    /// Tests that a failed name update keeps the window open.
    ///
    /// Expected: Err(Api), session still in NameCollection
    #[tokio::test]
    async fn keeps_collecting_name_when_update_fails() {
        let api = FakeApi {
            fail_updates: true,
            ..FakeApi::with_status(201)
        };
        let oracle = FakeOracle(None);
        let mut session = at_name_collection();

        let err = IntakeService::new(&api, &oracle)
            .save_name(&mut session, "Ana")
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::Api(_)));
        assert_eq!(session.state(), FlowState::NameCollection);
    }

    /// Tests that the terms phrase matches on trimmed text only.
    ///
    /// Expected: surrounding whitespace accepted, any other difference rejected
    #[test]
    fn matches_terms_on_trimmed_text_only() {
        let phrase = terms_phrase(Language::En);

        assert!(terms_match(Language::En, phrase));
        assert!(terms_match(Language::En, &format!("  {}\n", phrase)));
        assert!(!terms_match(Language::En, &phrase.to_lowercase()));
        assert!(!terms_match(Language::En, &format!("{}.", phrase)));
        assert!(!terms_match(Language::En, &format!("```{}```", phrase)));
        assert!(!terms_match(Language::Pt, phrase));
        assert!(terms_match(Language::Pt, terms_phrase(Language::Pt)));
    }
}
