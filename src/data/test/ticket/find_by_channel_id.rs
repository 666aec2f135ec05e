use super::*;

/// Tests looking up a ticket by its channel.
///
/// Expected: Ok(Some) for the ticket channel, Ok(None) for any other channel
#[tokio::test]
async fn finds_ticket_by_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::ticket::TicketFactory::new(db)
        .channel_id("424242")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_by_channel_id(424242).await?;
    assert_eq!(found.map(|t| t.ticket_id), Some(created.ticket_id));

    assert!(repo.find_by_channel_id(1).await?.is_none());

    Ok(())
}
