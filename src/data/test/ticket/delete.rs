use super::*;

/// Tests deleting a ticket row.
///
/// Expected: Ok(true) and no rows left, then Ok(false) for the same id
#[tokio::test]
async fn deletes_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_ticket(db).await?;
    let repo = TicketRepository::new(db);

    assert!(repo.delete(created.id).await?);
    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);
    assert!(!repo.delete(created.id).await?);

    Ok(())
}
