use super::*;

/// Tests inserting a validated application.
///
/// Expected: Ok with pending status, lower-cased email and empty review
#[tokio::test]
async fn creates_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let application = ApplicationRepository::new(db)
        .create(params(42, " Ana@Example.com ", "ana"))
        .await?;

    assert_eq!(application.discord_id, 42);
    assert_eq!(application.email, "ana@example.com");
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.game, Game::Valorant);
    assert!(application.hr_review.is_empty());

    Ok(())
}

/// Tests that one Discord user cannot hold two applications.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_second_application_from_same_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ApplicationRepository::new(db);
    repo.create(params(42, "a@example.com", "ana")).await?;
    let result = repo.create(params(42, "b@example.com", "ana2")).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert_eq!(entity::prelude::Application::find().count(db).await?, 1);

    Ok(())
}

/// Tests that emails are unique across applicants.
///
/// Expected: Err(DbErr) when the email differs only in case
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ApplicationRepository::new(db);
    repo.create(params(1, "same@example.com", "one")).await?;
    let result = repo.create(params(2, "SAME@example.com", "two")).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
