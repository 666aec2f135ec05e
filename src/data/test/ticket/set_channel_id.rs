use super::*;

/// Tests attaching the created channel to a ticket.
///
/// Expected: Ok with channel_id set
#[tokio::test]
async fn stores_channel_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(params("R01A01", 9, TicketKind::Report)).await?;

    let updated = repo.set_channel_id(ticket.id, 31337).await?;

    assert_eq!(updated.channel_id, Some(31337));
    assert_eq!(
        repo.find_by_channel_id(31337).await?.map(|t| t.id),
        Some(ticket.id)
    );

    Ok(())
}

/// Tests updating a ticket that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TicketRepository::new(db).set_channel_id(99, 1).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
