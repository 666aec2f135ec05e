//! Application data repository for database operations.
//!
//! Stores reviewed recruitment applications. Records are inserted as `pending`
//! and decided exactly once.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    error::AppError,
    model::application::{
        Application, ApplicationStatus, CreateApplicationParams, HR_REVIEW_MAX,
    },
};

pub struct ApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending application.
    ///
    /// # Arguments
    /// - `params` - Validated application fields
    ///
    /// # Returns
    /// - `Ok(Application)` - The created application
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. the applicant, email or Discord
    ///   username already has an application
    pub async fn create(&self, params: CreateApplicationParams) -> Result<Application, AppError> {
        let now = Utc::now();

        let entity = entity::application::ActiveModel {
            discord_id: ActiveValue::Set(params.discord_id.to_string()),
            applied_role: ActiveValue::Set(params.applied_role.as_str().to_string()),
            display_name: ActiveValue::Set(params.display_name),
            email: ActiveValue::Set(params.email.trim().to_lowercase()),
            discord: ActiveValue::Set(params.discord),
            region: ActiveValue::Set(params.region.code().to_string()),
            availability: ActiveValue::Set(params.availability.as_str().to_string()),
            legal_name: ActiveValue::Set(params.legal_name),
            birth_location: ActiveValue::Set(params.birth_location),
            street: ActiveValue::Set(params.street),
            city: ActiveValue::Set(params.city),
            postcode: ActiveValue::Set(params.postcode),
            country: ActiveValue::Set(params.country),
            game: ActiveValue::Set(params.game.api_name().to_string()),
            peak_rank: ActiveValue::Set(params.peak_rank),
            proof: ActiveValue::Set(params.proof),
            experience: ActiveValue::Set(params.experience),
            status: ActiveValue::Set(ApplicationStatus::Pending.as_str().to_string()),
            hr_review: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Application::from_entity(entity)
    }

    /// Finds the application submitted by a Discord user.
    pub async fn find_by_discord_id(
        &self,
        discord_id: u64,
    ) -> Result<Option<Application>, AppError> {
        let entity = entity::prelude::Application::find()
            .filter(entity::application::Column::DiscordId.eq(discord_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Application::from_entity).transpose()
    }

    /// Moves an application to a decided status.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the applicant
    /// - `status` - `Approved` or `Rejected`
    /// - `hr_review` - Reviewer note stored with the decision, such as a denial reason
    ///
    /// # Returns
    /// - `Ok(Application)` - Updated application
    /// - `Err(AppError::NotFound)` - The user has no application
    /// - `Err(AppError::BadRequest)` - The application is no longer pending; the
    ///   message names the current status
    pub async fn set_status(
        &self,
        discord_id: u64,
        status: ApplicationStatus,
        hr_review: Option<String>,
    ) -> Result<Application, AppError> {
        let entity = entity::prelude::Application::find()
            .filter(entity::application::Column::DiscordId.eq(discord_id.to_string()))
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found.".to_string()))?;

        let current = Application::from_entity(entity.clone())?.status;
        if !current.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change this application to {}. Current status: {}",
                status.as_str(),
                current.as_str()
            )));
        }

        let mut active: entity::application::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if let Some(review) = hr_review {
            active.hr_review = ActiveValue::Set(review.chars().take(HR_REVIEW_MAX).collect());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Application::from_entity(active.update(self.db).await?)
    }

    /// Deletes an application row.
    ///
    /// Used to undo an insert when the review channel could not be created.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Application::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
