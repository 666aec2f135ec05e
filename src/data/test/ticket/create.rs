use super::*;

/// Tests creating a new ticket.
///
/// Verifies that the ticket is stored open, without a channel, with the given
/// identifier and opener.
///
/// Expected: Ok with open ticket and no channel
#[tokio::test]
async fn creates_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(params("O01A01", 123456789, TicketKind::Order))
        .await?;

    assert_eq!(ticket.ticket_id, "O01A01");
    assert_eq!(ticket.user_id, 123456789);
    assert_eq!(ticket.kind, TicketKind::Order);
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.channel_id, None);
    assert_eq!(ticket.order_id.as_deref(), Some("ORD-1"));

    Ok(())
}

/// Tests that ticket identifiers are unique.
///
/// Expected: Err on the second insert, only one row stored
#[tokio::test]
async fn rejects_duplicate_ticket_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(params("S01A01", 1, TicketKind::Doubt)).await?;
    let result = repo.create(params("S01A01", 2, TicketKind::Doubt)).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 1);

    Ok(())
}
