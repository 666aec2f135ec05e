use super::*;

/// Tests closing an open ticket.
///
/// Expected: Ok with status closed
#[tokio::test]
async fn closes_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_ticket(db).await?;

    let closed = TicketRepository::new(db).close(created.id).await?;

    assert_eq!(closed.status, TicketStatus::Closed);

    Ok(())
}

/// Tests closing a ticket twice.
///
/// Expected: Err(BadRequest) on the second close
#[tokio::test]
async fn rejects_already_closed_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::ticket::TicketFactory::new(db)
        .status("closed")
        .build()
        .await?;

    let result = TicketRepository::new(db).close(created.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
