//! Application factory for creating test application entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test applications with customizable fields.
///
/// Unique columns (`discord_id`, `email`, `discord`) default to values derived from
/// the shared counter so several applications can coexist in one test.
pub struct ApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    applied_role: String,
    game: String,
    status: String,
}

impl<'a> ApplicationFactory<'a> {
    /// Creates a new ApplicationFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: a unique numeric id
    /// - applied_role: `"booster"`
    /// - game: `"league_of_legends"`
    /// - status: `"pending"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            discord_id: (200_000 + next_id()).to_string(),
            applied_role: "booster".to_string(),
            game: "league_of_legends".to_string(),
            status: "pending".to_string(),
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn applied_role(mut self, applied_role: impl Into<String>) -> Self {
        self.applied_role = applied_role.into();
        self
    }

    pub fn game(mut self, game: impl Into<String>) -> Self {
        self.game = game.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the application entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::application::Model)` - Created application entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now();
        entity::application::ActiveModel {
            email: ActiveValue::Set(format!("applicant{}@example.com", self.discord_id)),
            discord: ActiveValue::Set(format!("applicant{}", self.discord_id)),
            discord_id: ActiveValue::Set(self.discord_id),
            applied_role: ActiveValue::Set(self.applied_role),
            display_name: ActiveValue::Set("Applicant".to_string()),
            region: ActiveValue::Set("na".to_string()),
            availability: ActiveValue::Set("20-30".to_string()),
            legal_name: ActiveValue::Set("Test Applicant".to_string()),
            birth_location: ActiveValue::Set("us".to_string()),
            street: ActiveValue::Set("1 Main St".to_string()),
            city: ActiveValue::Set("Springfield".to_string()),
            postcode: ActiveValue::Set("12345".to_string()),
            country: ActiveValue::Set("us".to_string()),
            game: ActiveValue::Set(self.game),
            peak_rank: ActiveValue::Set("master".to_string()),
            proof: ActiveValue::Set("https://op.gg/summoners/na/test".to_string()),
            experience: ActiveValue::Set("Two seasons of coaching experience".to_string()),
            status: ActiveValue::Set(self.status),
            hr_review: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending booster application with default values.
pub async fn create_application(
    db: &DatabaseConnection,
) -> Result<entity::application::Model, DbErr> {
    ApplicationFactory::new(db).build().await
}
