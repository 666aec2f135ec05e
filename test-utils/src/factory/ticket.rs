//! Ticket factory for creating test ticket entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let ticket = TicketFactory::new(&db)
///     .user_id("123456789")
///     .kind("doubt")
///     .status("closed")
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    ticket_id: String,
    channel_id: String,
    user_id: String,
    kind: String,
    status: String,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - ticket_id: `"T01A{id}"`
    /// - channel_id: a unique numeric id
    /// - user_id: a unique numeric id
    /// - kind: `"order"`
    /// - status: `"open"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            ticket_id: format!("T01A{:02}", id),
            channel_id: (900_000 + id).to_string(),
            user_id: (100_000 + id).to_string(),
            kind: "order".to_string(),
            status: "open".to_string(),
        }
    }

    pub fn ticket_id(mut self, ticket_id: impl Into<String>) -> Self {
        self.ticket_id = ticket_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the ticket entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ticket::Model)` - Created ticket entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now();
        entity::ticket::ActiveModel {
            ticket_id: ActiveValue::Set(self.ticket_id),
            channel_id: ActiveValue::Set(self.channel_id),
            user_id: ActiveValue::Set(self.user_id),
            kind: ActiveValue::Set(self.kind),
            subject: ActiveValue::Set("Test subject".to_string()),
            description: ActiveValue::Set("Test description".to_string()),
            order_id: ActiveValue::Set(None),
            reported_user: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open order ticket with default values.
///
/// Shorthand for `TicketFactory::new(db).build().await`.
pub async fn create_ticket(db: &DatabaseConnection) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_ticket_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = create_ticket(db).await?;

        assert_eq!(ticket.kind, "order");
        assert_eq!(ticket.status, "open");
        assert!(!ticket.channel_id.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_tickets() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_ticket(db).await?;
        let second = create_ticket(db).await?;

        assert_ne!(first.ticket_id, second.ticket_id);
        assert_ne!(first.channel_id, second.channel_id);

        Ok(())
    }
}
