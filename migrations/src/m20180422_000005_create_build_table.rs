use sea_orm_migration::prelude::*;

use crate::m20180415_000002_create_part_tables::Part;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Build::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Build::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Batch code for this build output
                    .col(ColumnDef::new(Build::Batch).string_len(100).null())
                    // 10 = pending, 20 = holding, 30 = cancelled, 40 = complete
                    .col(
                        ColumnDef::new(Build::Status)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(ColumnDef::new(Build::CreationDate).date().not_null())
                    .col(ColumnDef::new(Build::CompletionDate).date().null())
                    .col(ColumnDef::new(Build::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Build::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Build::Notes).text().not_null().default(""))
                    .col(ColumnDef::new(Build::PartId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_build_part")
                            .from(Build::Table, Build::PartId)
                            .to(Part::Table, Part::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Build::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
    Batch,
    Status,
    CreationDate,
    CompletionDate,
    Title,
    Quantity,
    Notes,
    PartId,
}
