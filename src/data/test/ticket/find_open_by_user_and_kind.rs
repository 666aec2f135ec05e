use super::*;

/// Tests finding a user's open ticket of a kind.
///
/// Expected: Ok(Some) for the matching kind, Ok(None) for another kind
#[tokio::test]
async fn finds_open_ticket_of_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::ticket::TicketFactory::new(db)
        .user_id("555")
        .kind("report")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo
        .find_open_by_user_and_kind(555, TicketKind::Report)
        .await?;
    assert_eq!(found.map(|t| t.id), Some(created.id));

    let other = repo.find_open_by_user_and_kind(555, TicketKind::Order).await?;
    assert!(other.is_none());

    Ok(())
}

/// Tests that closed tickets do not block a new ticket.
///
/// Expected: Ok(None) when the user's only ticket of the kind is closed
#[tokio::test]
async fn ignores_closed_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .user_id("555")
        .kind("doubt")
        .status("closed")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_open_by_user_and_kind(555, TicketKind::Doubt).await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests that tickets of other users are not returned.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .user_id("777")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_open_by_user_and_kind(555, TicketKind::Order).await?;

    assert!(found.is_none());

    Ok(())
}
