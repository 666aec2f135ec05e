//! Booster profiles stored by the backend and the HR decision on them.

use crate::{
    error::{flow::ApiError, AppError},
    model::profile::{BoosterProfile, ProfileUpdate},
    service::application::api::BoosterApi,
};

/// Decision HR can take from a profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileDecision {
    Approve,
    Reject,
}

impl ProfileDecision {
    pub fn status(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

pub struct ProfileService<'a> {
    api: &'a dyn BoosterApi,
}

impl<'a> ProfileService<'a> {
    pub fn new(api: &'a dyn BoosterApi) -> Self {
        Self { api }
    }

    /// Fetches a user's booster profile.
    ///
    /// # Returns
    /// - `Ok(BoosterProfile)` - The stored profile
    /// - `Err(AppError::NotFound)` - The user never applied
    /// - `Err(AppError::ApiErr)` - Any other backend failure
    pub async fn get(&self, discord_id: u64) -> Result<BoosterProfile, AppError> {
        match self.api.get_profile(discord_id).await {
            Ok(profile) => Ok(profile),
            Err(ApiError::UnexpectedStatus { status: 404, .. }) => Err(AppError::NotFound(
                "This user does not have a booster profile.".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Applies an HR decision to a profile that is still pending.
    ///
    /// # Returns
    /// - `Ok(BoosterProfile)` - Profile with the new status
    /// - `Err(AppError::BadRequest)` - The profile was already decided; the message
    ///   names the current status
    pub async fn decide(
        &self,
        discord_id: u64,
        decision: ProfileDecision,
    ) -> Result<BoosterProfile, AppError> {
        let mut profile = self.get(discord_id).await?;

        if !profile.is_pending() {
            return Err(AppError::BadRequest(format!(
                "Cannot {} this application. Current status: {}",
                decision.verb(),
                profile.application_status.as_deref().unwrap_or("pending")
            )));
        }

        self.api
            .update_profile(discord_id, &ProfileUpdate::status(decision.status()))
            .await?;
        tracing::info!(
            "Booster profile of user {} marked {}",
            discord_id,
            decision.status()
        );

        profile.application_status = Some(decision.status().to_string());

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serenity::async_trait;

    use super::*;
    use crate::model::profile::ApplyRequest;
    use crate::service::application::api::ApiResponse;

    struct FakeApi {
        profile: Option<BoosterProfile>,
        updates: Mutex<Vec<ProfileUpdate>>,
    }

    impl FakeApi {
        fn with_status(status: Option<&str>) -> Self {
            Self {
                profile: Some(BoosterProfile {
                    game: Some("valorant".to_string()),
                    application_status: status.map(str::to_string),
                    ..BoosterProfile::default()
                }),
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BoosterApi for FakeApi {
        async fn apply(&self, _request: &ApplyRequest) -> Result<ApiResponse, ApiError> {
            unreachable!("profiles never submit applications")
        }

        async fn update_profile(
            &self,
            _discord_id: u64,
            update: &ProfileUpdate,
        ) -> Result<(), ApiError> {
            self.updates.lock().unwrap().push(update.clone());
            Ok(())
        }

        async fn get_profile(&self, _discord_id: u64) -> Result<BoosterProfile, ApiError> {
            self.profile.clone().ok_or(ApiError::UnexpectedStatus {
                status: 404,
                message: Some("Profile not found".to_string()),
            })
        }
    }

    /// Tests approving a pending profile.
    ///
    /// Expected: Ok with status approved, one status patch sent
    #[tokio::test]
    async fn approves_pending_profile() {
        let api = FakeApi::with_status(Some("pending"));

        let profile = ProfileService::new(&api)
            .decide(1, ProfileDecision::Approve)
            .await
            .unwrap();

        assert_eq!(profile.status_label(), "✅ Approved");
        assert_eq!(
            *api.updates.lock().unwrap(),
            vec![ProfileUpdate::status("approved")]
        );
    }

    /// Tests that a decided profile cannot be decided again.
    ///
    /// Expected: Err(BadRequest) with the current status, no patch sent
    #[tokio::test]
    async fn refuses_decided_profile() {
        let api = FakeApi::with_status(Some("rejected"));

        let result = ProfileService::new(&api)
            .decide(1, ProfileDecision::Approve)
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Cannot approve this application. Current status: rejected")
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
        assert!(api.updates.lock().unwrap().is_empty());
    }

    /// Tests looking up a user without a profile.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn reports_missing_profile() {
        let api = FakeApi {
            profile: None,
            updates: Mutex::new(Vec::new()),
        };

        let result = ProfileService::new(&api).get(1).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
