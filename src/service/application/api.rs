//! Client for the booster backend API.

use reqwest::StatusCode;
use serenity::async_trait;

use crate::error::flow::ApiError;
use crate::model::profile::{ApplyRequest, BoosterProfile, ErrorDto, ProfileUpdate};

/// Raw outcome of a backend call that the caller judges itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Error text from the response body, if it carried one
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn is_created(&self) -> bool {
        self.status == StatusCode::CREATED.as_u16()
    }
}

/// Operations the bot performs against the booster backend.
#[async_trait]
pub trait BoosterApi: Send + Sync {
    /// `POST /apply`; returns the response status whatever it is.
    async fn apply(&self, request: &ApplyRequest) -> Result<ApiResponse, ApiError>;

    /// `PATCH /booster/profile/:id`; any non-2xx status is an error.
    async fn update_profile(&self, discord_id: u64, update: &ProfileUpdate)
        -> Result<(), ApiError>;

    /// `GET /booster/profile/:id`.
    async fn get_profile(&self, discord_id: u64) -> Result<BoosterProfile, ApiError>;
}

/// HTTP implementation of [`BoosterApi`].
///
/// Every request carries the static `Authorization` token from configuration.
#[derive(Clone)]
pub struct BoosterApiClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl BoosterApiClient {
    /// Creates a new BoosterApiClient.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `base_url` - API base URL without a trailing slash
    /// - `token` - Value sent in the `Authorization` header
    pub fn new(http_client: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            http_client,
            base_url,
            token,
        }
    }

    fn profile_url(&self, discord_id: u64) -> String {
        format!("{}/booster/profile/{}", self.base_url, discord_id)
    }
}

async fn error_message(response: reqwest::Response) -> Option<String> {
    response.json::<ErrorDto>().await.ok().map(|dto| dto.error)
}

#[async_trait]
impl BoosterApi for BoosterApiClient {
    async fn apply(&self, request: &ApplyRequest) -> Result<ApiResponse, ApiError> {
        let response = self
            .http_client
            .post(format!("{}/apply", self.base_url))
            .header("Authorization", &self.token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let message = if status == StatusCode::CREATED {
            None
        } else {
            error_message(response).await
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            message,
        })
    }

    async fn update_profile(
        &self,
        discord_id: u64,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let response = self
            .http_client
            .patch(self.profile_url(discord_id))
            .header("Authorization", &self.token)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        Ok(())
    }

    async fn get_profile(&self, discord_id: u64) -> Result<BoosterProfile, ApiError> {
        let response = self
            .http_client
            .get(self.profile_url(discord_id))
            .header("Authorization", &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        Ok(response.json::<BoosterProfile>().await?)
    }
}
