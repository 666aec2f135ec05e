use super::*;

/// Tests looking up a ticket by its identifier.
///
/// Expected: Ok(Some) for a stored identifier, Ok(None) for an unused one
#[tokio::test]
async fn finds_ticket_by_ticket_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::ticket::TicketFactory::new(db)
        .ticket_id("S07C12")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_by_ticket_id("S07C12").await?;
    assert_eq!(found.map(|t| t.id), Some(created.id));

    assert!(repo.find_by_ticket_id("S07C13").await?.is_none());

    Ok(())
}
