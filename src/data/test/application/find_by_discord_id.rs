use super::*;

/// Tests finding an application by applicant.
///
/// Expected: Ok(Some) for the applicant, Ok(None) for anyone else
#[tokio::test]
async fn finds_application_by_applicant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::application::ApplicationFactory::new(db)
        .discord_id("31337")
        .applied_role("coach")
        .build()
        .await?;

    let repo = ApplicationRepository::new(db);
    let found = repo.find_by_discord_id(31337).await?.unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.applied_role, AppliedRole::Coach);
    assert!(repo.find_by_discord_id(1).await?.is_none());

    Ok(())
}

/// Tests that a corrupt enum column is reported instead of silently mapped.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn reports_unknown_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::application::ApplicationFactory::new(db)
        .discord_id("5")
        .status("archived")
        .build()
        .await?;

    let result = ApplicationRepository::new(db).find_by_discord_id(5).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
