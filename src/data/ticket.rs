//! Ticket data repository for database operations.
//!
//! This module provides the `TicketRepository` for managing support ticket records.
//! Tickets are inserted before their Discord channel exists, then updated with the
//! channel id once it is created, and finally closed from the ticket channel.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    error::AppError,
    model::ticket::{CreateTicketParams, Ticket, TicketKind, TicketStatus},
};

/// Repository providing database operations for ticket management.
pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new TicketRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `TicketRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new open ticket without a channel.
    ///
    /// # Arguments
    /// - `params` - Ticket fields including the allocated ticket identifier
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. duplicate ticket identifier
    pub async fn create(&self, params: CreateTicketParams) -> Result<Ticket, AppError> {
        let now = Utc::now();

        let entity = entity::ticket::ActiveModel {
            ticket_id: ActiveValue::Set(params.ticket_id),
            channel_id: ActiveValue::Set(String::new()),
            user_id: ActiveValue::Set(params.user_id.to_string()),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            subject: ActiveValue::Set(params.subject),
            description: ActiveValue::Set(params.description),
            order_id: ActiveValue::Set(params.order_id),
            reported_user: ActiveValue::Set(params.reported_user),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Finds the user's open ticket of the given kind, if any.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the ticket opener
    /// - `kind` - Ticket kind to look for
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - An open ticket exists
    /// - `Ok(None)` - The user has no open ticket of this kind
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn find_open_by_user_and_kind(
        &self,
        user_id: u64,
        kind: TicketKind,
    ) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ticket::Column::Kind.eq(kind.as_str()))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Finds the ticket whose channel is `channel_id`.
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Finds the ticket with the human-readable identifier `ticket_id`.
    pub async fn find_by_ticket_id(&self, ticket_id: &str) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::TicketId.eq(ticket_id))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Records the Discord channel created for a ticket.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Updated ticket
    /// - `Err(AppError::NotFound)` - No ticket with this id
    pub async fn set_channel_id(&self, id: i32, channel_id: u64) -> Result<Ticket, AppError> {
        let mut active: entity::ticket::ActiveModel = self.find_entity(id).await?.into();
        active.channel_id = ActiveValue::Set(channel_id.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ticket::from_entity(active.update(self.db).await?)
    }

    /// Marks a ticket closed.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The closed ticket
    /// - `Err(AppError::NotFound)` - No ticket with this id
    /// - `Err(AppError::BadRequest)` - The ticket is already closed
    pub async fn close(&self, id: i32) -> Result<Ticket, AppError> {
        let entity = self.find_entity(id).await?;
        if entity.status == TicketStatus::Closed.as_str() {
            return Err(AppError::BadRequest(format!(
                "Ticket {} is already closed.",
                entity.ticket_id
            )));
        }

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.status = ActiveValue::Set(TicketStatus::Closed.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ticket::from_entity(active.update(self.db).await?)
    }

    /// Deletes a ticket row.
    ///
    /// Used to undo an insert when the ticket channel could not be created.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - No ticket with this id existed
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Ticket::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn find_entity(&self, id: i32) -> Result<entity::ticket::Model, AppError> {
        entity::prelude::Ticket::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found.", id)))
    }
}
