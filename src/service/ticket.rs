use sea_orm::DatabaseConnection;
use serenity::async_trait;

use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{Ticket, TicketKind, TicketSubmission},
    service::ticket_id::TicketIdAllocator,
};

const MAX_ID_ATTEMPTS: usize = 1000;

/// Creates the private channel a support ticket is handled in.
#[async_trait]
pub trait TicketChannelProvisioner: Send + Sync {
    /// Creates `<kind>-<username>`, posts the ticket summary with a *Close Ticket*
    /// button and returns the new channel id.
    async fn create_ticket_channel(&self, ticket: &Ticket, username: &str)
        -> Result<u64, AppError>;
}

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    allocator: &'a TicketIdAllocator,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection, allocator: &'a TicketIdAllocator) -> Self {
        Self { db, allocator }
    }

    /// Gets the user's open ticket of a kind, if any.
    pub async fn find_open(
        &self,
        user_id: u64,
        kind: TicketKind,
    ) -> Result<Option<Ticket>, AppError> {
        TicketRepository::new(self.db)
            .find_open_by_user_and_kind(user_id, kind)
            .await
    }

    /// Opens a ticket from a submitted modal.
    ///
    /// Allocates an identifier, stores the ticket and provisions its channel. The
    /// stored ticket is deleted again if the channel cannot be created.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the opener
    /// - `username` - Opener's username, used for the channel name
    /// - `submission` - Fields from the ticket modal
    /// - `provisioner` - Creates the ticket channel
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The open ticket with its channel id set
    /// - `Err(AppError::BadRequest)` - The user already has an open ticket of this kind
    /// - `Err(AppError)` - Storing the ticket or creating the channel failed
    pub async fn open(
        &self,
        user_id: u64,
        username: &str,
        submission: TicketSubmission,
        provisioner: &dyn TicketChannelProvisioner,
    ) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        if let Some(existing) = repo
            .find_open_by_user_and_kind(user_id, submission.kind)
            .await?
        {
            return Err(AppError::BadRequest(already_open_message(&existing)));
        }

        let ticket_id = self.allocate_unused_id(&repo, submission.kind).await?;
        let ticket = repo.create(submission.into_params(ticket_id, user_id)).await?;

        let channel_id = match provisioner.create_ticket_channel(&ticket, username).await {
            Ok(channel_id) => channel_id,
            Err(err) => {
                tracing::error!(
                    "Failed to create channel for ticket {}: {}",
                    ticket.ticket_id,
                    err
                );
                if let Err(delete_err) = repo.delete(ticket.id).await {
                    tracing::error!(
                        "Failed to remove ticket {} after channel failure: {}",
                        ticket.ticket_id,
                        delete_err
                    );
                }
                return Err(err);
            }
        };

        let ticket = repo.set_channel_id(ticket.id, channel_id).await?;
        tracing::info!(
            "Opened ticket {} for user {} in channel {}",
            ticket.ticket_id,
            user_id,
            channel_id
        );

        Ok(ticket)
    }

    /// Allocates the next identifier not already stored.
    ///
    /// The allocator's cursors live in memory, so after a restart or at the start
    /// of a new year they reissue identifiers that earlier tickets still hold.
    async fn allocate_unused_id(
        &self,
        repo: &TicketRepository<'_>,
        kind: TicketKind,
    ) -> Result<String, AppError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let ticket_id = self.allocator.allocate(kind.prefix()).await;
            if repo.find_by_ticket_id(&ticket_id).await?.is_none() {
                return Ok(ticket_id);
            }
            tracing::warn!("Skipping ticket id {}, already in use", ticket_id);
        }

        Err(AppError::InternalError(format!(
            "No unused {} ticket id after {} attempts",
            kind.as_str(),
            MAX_ID_ATTEMPTS
        )))
    }

    /// Closes the ticket handled in `channel_id`.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The closed ticket
    /// - `Err(AppError::NotFound)` - The channel does not belong to a ticket
    /// - `Err(AppError::BadRequest)` - The ticket is already closed
    pub async fn close(&self, channel_id: u64) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo
            .find_by_channel_id(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("This channel is not a ticket.".to_string()))?;

        let ticket = repo.close(ticket.id).await?;
        tracing::info!("Closed ticket {}", ticket.ticket_id);

        Ok(ticket)
    }
}

/// Reply pointing a user at the ticket they already have open.
pub fn already_open_message(ticket: &Ticket) -> String {
    match ticket.channel_id {
        Some(channel_id) => format!(
            "You already have an open {} ticket: <#{}>",
            ticket.kind.as_str(),
            channel_id
        ),
        None => format!(
            "You already have an open {} ticket ({}).",
            ticket.kind.as_str(),
            ticket.ticket_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use chrono::Utc;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::model::ticket::TicketStatus;

    struct FakeProvisioner {
        fail: bool,
        next_channel: AtomicU64,
    }

    impl FakeProvisioner {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                next_channel: AtomicU64::new(9000),
            }
        }
    }

    #[async_trait]
    impl TicketChannelProvisioner for FakeProvisioner {
        async fn create_ticket_channel(
            &self,
            _ticket: &Ticket,
            _username: &str,
        ) -> Result<u64, AppError> {
            if self.fail {
                return Err(AppError::InternalError("Missing Permissions".to_string()));
            }
            Ok(self.next_channel.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn submission(kind: TicketKind) -> TicketSubmission {
        TicketSubmission {
            kind,
            subject: "Boost paused".to_string(),
            description: "My booster stopped playing two days ago".to_string(),
            order_id: Some("ORD-77".to_string()),
            reported_user: None,
        }
    }

    /// Tests opening a ticket end to end.
    ///
    /// Expected: Ok with an allocated O-prefixed identifier and the channel stored
    #[tokio::test]
    async fn opens_ticket_with_channel() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let allocator = TicketIdAllocator::new();
        let provisioner = FakeProvisioner::new(false);

        let ticket = TicketService::new(db, &allocator)
            .open(5, "ana", submission(TicketKind::Order), &provisioner)
            .await?;

        let expected = format!("O{}A01", Utc::now().format("%m"));
        assert_eq!(ticket.ticket_id, expected);
        assert_eq!(ticket.channel_id, Some(9000));
        assert_eq!(ticket.status, TicketStatus::Open);

        Ok(())
    }

    /// Tests opening a ticket when the allocator's first identifier is already
    /// stored, as after a restart.
    ///
    /// Expected: Ok with the next identifier in the sequence
    #[tokio::test]
    async fn skips_identifiers_already_stored() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let month = Utc::now().format("%m").to_string();
        factory::ticket::TicketFactory::new(db)
            .ticket_id(format!("O{}A01", month))
            .user_id("3")
            .kind("order")
            .status("closed")
            .build()
            .await?;
        let allocator = TicketIdAllocator::new();
        let provisioner = FakeProvisioner::new(false);

        let ticket = TicketService::new(db, &allocator)
            .open(77, "duda", submission(TicketKind::Order), &provisioner)
            .await?;

        assert_eq!(ticket.ticket_id, format!("O{}A02", month));
        assert_eq!(ticket.status, TicketStatus::Open);

        Ok(())
    }

    /// Tests that a user cannot hold two open tickets of the same kind.
    ///
    /// Expected: Err(BadRequest) linking the existing channel
    #[tokio::test]
    async fn refuses_second_open_ticket_of_same_kind() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::ticket::TicketFactory::new(db)
            .user_id("6")
            .kind("doubt")
            .channel_id("1234")
            .build()
            .await?;
        let allocator = TicketIdAllocator::new();
        let provisioner = FakeProvisioner::new(false);

        let result = TicketService::new(db, &allocator)
            .open(6, "bia", submission(TicketKind::Doubt), &provisioner)
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("<#1234>")),
            other => panic!("expected BadRequest, got {:?}", other),
        }

        Ok(())
    }

    /// Tests that a failed channel creation removes the stored ticket.
    ///
    /// Expected: Err, no ticket rows left
    #[tokio::test]
    async fn removes_ticket_when_channel_fails() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let allocator = TicketIdAllocator::new();
        let provisioner = FakeProvisioner::new(true);

        let result = TicketService::new(db, &allocator)
            .open(7, "caio", submission(TicketKind::Report), &provisioner)
            .await;

        assert!(result.is_err());
        assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);

        Ok(())
    }

    /// Tests closing a ticket twice and closing a non-ticket channel.
    ///
    /// Expected: first close Ok, second Err(BadRequest), unknown channel Err(NotFound)
    #[tokio::test]
    async fn closes_ticket_once() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::ticket::TicketFactory::new(db)
            .channel_id("4321")
            .build()
            .await?;
        let allocator = TicketIdAllocator::new();
        let service = TicketService::new(db, &allocator);

        let closed = service.close(4321).await?;
        assert_eq!(closed.status, TicketStatus::Closed);

        assert!(matches!(
            service.close(4321).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(service.close(1).await, Err(AppError::NotFound(_))));

        Ok(())
    }
}
