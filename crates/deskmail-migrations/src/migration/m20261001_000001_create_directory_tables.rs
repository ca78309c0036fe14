use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========================================
        // EMPLOYEES TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(255).null())
                    .col(ColumnDef::new(Employees::LastName).string_len(255).null())
                    .col(ColumnDef::new(Employees::Name).string_len(255).null())
                    .col(ColumnDef::new(Employees::Email).string_len(255).null())
                    .col(ColumnDef::new(Employees::Position).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Employees::Department)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Directory lookups are always (position, department)
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_position_department")
                    .table(Employees::Table)
                    .col(Employees::Position)
                    .col(Employees::Department)
                    .to_owned(),
            )
            .await?;

        // ========================================
        // POSITION_ALIASES TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(PositionAliases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PositionAliases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::Position)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::EmployeeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PositionAliases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_position_aliases_position")
                    .table(PositionAliases::Table)
                    .col(PositionAliases::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_position_aliases_position")
                    .table(PositionAliases::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PositionAliases::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_employees_position_department")
                    .table(Employees::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Name,
    Email,
    Position,
    Department,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PositionAliases {
    Table,
    Id,
    Position,
    EmployeeName,
    Email,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
