//! Staff review of recruitment applications submitted through the web form.

use sea_orm::DatabaseConnection;
use serenity::async_trait;

use crate::{
    data::application::ApplicationRepository,
    error::AppError,
    model::application::{Application, ApplicationStatus, CreateApplicationParams},
};

/// Creates the private channel a reviewed application is discussed in.
#[async_trait]
pub trait ReviewChannelProvisioner: Send + Sync {
    /// Creates `<discord>-application`, posts the application summary and returns
    /// the new channel id.
    async fn create_review_channel(&self, application: &Application) -> Result<u64, AppError>;
}

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a confirmed application and opens its review channel.
    ///
    /// The inserted row is deleted again if the channel cannot be created, so a
    /// failed proceed can simply be retried.
    ///
    /// # Arguments
    /// - `params` - Validated application parsed from the form message
    /// - `provisioner` - Creates the review channel
    ///
    /// # Returns
    /// - `Ok((Application, u64))` - The stored application and its channel id
    /// - `Err(AppError::BadRequest)` - The applicant already has an application
    /// - `Err(AppError)` - Insert or channel creation failed
    pub async fn proceed(
        &self,
        params: CreateApplicationParams,
        provisioner: &dyn ReviewChannelProvisioner,
    ) -> Result<(Application, u64), AppError> {
        let repo = ApplicationRepository::new(self.db);

        if let Some(existing) = repo.find_by_discord_id(params.discord_id).await? {
            return Err(AppError::BadRequest(format!(
                "This user already has an application. Current status: {}",
                existing.status.as_str()
            )));
        }

        let application = repo.create(params).await?;

        match provisioner.create_review_channel(&application).await {
            Ok(channel_id) => {
                tracing::info!(
                    "Stored application {} for user {} in channel {}",
                    application.id,
                    application.discord_id,
                    channel_id
                );
                Ok((application, channel_id))
            }
            Err(err) => {
                tracing::error!(
                    "Failed to create review channel for application {}: {}",
                    application.id,
                    err
                );
                if let Err(delete_err) = repo.delete(application.id).await {
                    tracing::error!(
                        "Failed to remove application {} after channel failure: {}",
                        application.id,
                        delete_err
                    );
                }
                Err(err)
            }
        }
    }

    /// Approves a pending application.
    pub async fn approve(&self, discord_id: u64) -> Result<Application, AppError> {
        self.decide(discord_id, ApplicationStatus::Approved, None, "approve")
            .await
    }

    /// Denies a pending application, storing the reason as the HR review.
    pub async fn deny(&self, discord_id: u64, reason: String) -> Result<Application, AppError> {
        self.decide(discord_id, ApplicationStatus::Rejected, Some(reason), "deny")
            .await
    }

    async fn decide(
        &self,
        discord_id: u64,
        status: ApplicationStatus,
        hr_review: Option<String>,
        verb: &str,
    ) -> Result<Application, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_discord_id(discord_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found.".to_string()))?;

        if application.status != ApplicationStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Cannot {} this application. Current status: {}",
                verb,
                application.status.as_str()
            )));
        }

        let application = repo.set_status(discord_id, status, hr_review).await?;
        tracing::info!(
            "Application of user {} is now {}",
            discord_id,
            application.status.as_str()
        );

        Ok(application)
    }
}
