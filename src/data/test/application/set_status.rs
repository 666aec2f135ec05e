use super::*;

/// Tests approving a pending application.
///
/// Expected: Ok with status approved
#[tokio::test]
async fn approves_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::application::ApplicationFactory::new(db)
        .discord_id("10")
        .build()
        .await?;

    let updated = ApplicationRepository::new(db)
        .set_status(10, ApplicationStatus::Approved, None)
        .await?;

    assert_eq!(updated.status, ApplicationStatus::Approved);
    assert_eq!(updated.hr_review, "");

    Ok(())
}

/// Tests that a denial stores the reviewer's reason, capped in length.
///
/// Expected: Ok with status rejected and the reason truncated to the review limit
#[tokio::test]
async fn stores_denial_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::application::ApplicationFactory::new(db)
        .discord_id("13")
        .build()
        .await?;

    let reason = "x".repeat(HR_REVIEW_MAX + 50);
    let updated = ApplicationRepository::new(db)
        .set_status(13, ApplicationStatus::Rejected, Some(reason))
        .await?;

    assert_eq!(updated.status, ApplicationStatus::Rejected);
    assert_eq!(updated.hr_review.len(), HR_REVIEW_MAX);

    Ok(())
}

/// Tests that a decided application cannot be decided again.
///
/// Expected: Err(BadRequest) naming the current status, row unchanged
#[tokio::test]
async fn rejects_transition_from_decided_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::application::ApplicationFactory::new(db)
        .discord_id("11")
        .status("rejected")
        .build()
        .await?;

    let repo = ApplicationRepository::new(db);
    let result = repo.set_status(11, ApplicationStatus::Approved, None).await;

    match result {
        Err(AppError::BadRequest(msg)) => assert!(msg.contains("rejected")),
        other => panic!("expected BadRequest, got {:?}", other),
    }
    let stored = repo.find_by_discord_id(11).await?.unwrap();
    assert_eq!(stored.status, ApplicationStatus::Rejected);

    Ok(())
}

/// Tests deciding an application that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ApplicationRepository::new(db)
        .set_status(12, ApplicationStatus::Rejected, None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
