use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(string_uniq(Application::DiscordId))
                    .col(string(Application::AppliedRole))
                    .col(string(Application::DisplayName))
                    .col(string_uniq(Application::Email))
                    .col(string_uniq(Application::Discord))
                    .col(string(Application::Region))
                    .col(string(Application::Availability))
                    .col(string(Application::LegalName))
                    .col(string(Application::BirthLocation))
                    .col(string(Application::Street))
                    .col(string(Application::City))
                    .col(string(Application::Postcode))
                    .col(string(Application::Country))
                    .col(string(Application::Game))
                    .col(string(Application::PeakRank))
                    .col(string(Application::Proof))
                    .col(text(Application::Experience))
                    .col(string(Application::Status))
                    .col(text(Application::HrReview))
                    .col(timestamp(Application::CreatedAt))
                    .col(timestamp(Application::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_application_status", Application::Status),
            ("idx_application_game", Application::Game),
            ("idx_application_region", Application::Region),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Application::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_application_status",
            "idx_application_game",
            "idx_application_region",
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Application::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
    DiscordId,
    AppliedRole,
    DisplayName,
    Email,
    Discord,
    Region,
    Availability,
    LegalName,
    BirthLocation,
    Street,
    City,
    Postcode,
    Country,
    Game,
    PeakRank,
    Proof,
    Experience,
    Status,
    HrReview,
    CreatedAt,
    UpdatedAt,
}
