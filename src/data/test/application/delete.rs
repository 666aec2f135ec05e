use super::*;

/// Tests deleting an application row.
///
/// Expected: Ok(true) and the table empty afterwards
#[tokio::test]
async fn deletes_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_application(db).await?;

    assert!(ApplicationRepository::new(db).delete(created.id).await?);
    assert_eq!(entity::prelude::Application::find().count(db).await?, 0);

    Ok(())
}
