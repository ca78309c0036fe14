use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SenderId).integer().null())
                    .col(
                        ColumnDef::new(Messages::SenderName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messages::SenderEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messages::RequestType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Messages::Subject).text().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::Recipients).json_binary().not_null())
                    .col(
                        ColumnDef::new(Messages::CcRecipients)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Messages::ToPositions).json_binary().not_null())
                    .col(ColumnDef::new(Messages::CcPositions).json_binary().not_null())
                    .col(
                        ColumnDef::new(Messages::Priority)
                            .string_len(50)
                            .not_null()
                            .default("Normal"),
                    )
                    .col(
                        ColumnDef::new(Messages::Department)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Messages::LeaveDetails).json_binary().null())
                    .col(
                        ColumnDef::new(Messages::Status)
                            .string_len(50)
                            .not_null()
                            .default("Sent"),
                    )
                    .col(
                        ColumnDef::new(Messages::EmailStatus)
                            .string_len(50)
                            .not_null()
                            .default("Not Sent"),
                    )
                    .col(
                        ColumnDef::new(Messages::EmailResults)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_sender_email")
                    .table(Messages::Table)
                    .col(Messages::SenderEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_department")
                    .table(Messages::Table)
                    .col(Messages::Department)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_email_status")
                    .table(Messages::Table)
                    .col(Messages::EmailStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_created_at")
                    .table(Messages::Table)
                    .col(Messages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for index in [
            "idx_messages_created_at",
            "idx_messages_email_status",
            "idx_messages_department",
            "idx_messages_sender_email",
        ] {
            manager
                .drop_index(Index::drop().name(index).table(Messages::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SenderId,
    SenderName,
    SenderEmail,
    RequestType,
    Subject,
    Body,
    Recipients,
    CcRecipients,
    ToPositions,
    CcPositions,
    Priority,
    Department,
    LeaveDetails,
    Status,
    EmailStatus,
    EmailResults,
    CreatedAt,
    UpdatedAt,
}
