use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartCategory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PartCategory::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(PartCategory::Description)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(PartCategory::ParentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_part_category_parent")
                            .from(PartCategory::Table, PartCategory::ParentId)
                            .to(PartCategory::Table, PartCategory::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockLocation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockLocation::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockLocation::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(StockLocation::Description)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(StockLocation::ParentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_location_parent")
                            .from(StockLocation::Table, StockLocation::ParentId)
                            .to(StockLocation::Table, StockLocation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockLocation::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PartCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum PartCategory {
    Table,
    Id,
    Name,
    Description,
    ParentId,
}

#[derive(DeriveIden)]
pub(crate) enum StockLocation {
    Table,
    Id,
    Name,
    Description,
    ParentId,
}
