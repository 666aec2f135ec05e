use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string_uniq(Ticket::TicketId))
                    .col(string(Ticket::ChannelId))
                    .col(string(Ticket::UserId))
                    .col(string(Ticket::Kind))
                    .col(string(Ticket::Subject))
                    .col(text(Ticket::Description))
                    .col(string_null(Ticket::OrderId))
                    .col(string_null(Ticket::ReportedUser))
                    .col(string(Ticket::Status))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp(Ticket::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Lookups for "does this user already have an open ticket of this kind"
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_user_kind_status")
                    .table(Ticket::Table)
                    .col(Ticket::UserId)
                    .col(Ticket::Kind)
                    .col(Ticket::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .col(Ticket::ChannelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_user_kind_status")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    TicketId,
    ChannelId,
    UserId,
    Kind,
    Subject,
    Description,
    OrderId,
    ReportedUser,
    Status,
    CreatedAt,
    UpdatedAt,
}
