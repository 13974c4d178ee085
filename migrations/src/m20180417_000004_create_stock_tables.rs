use sea_orm_migration::prelude::*;

use crate::m20180415_000001_create_tree_tables::StockLocation;
use crate::m20180415_000002_create_part_tables::Part;
use crate::m20180416_000003_create_supplier_tables::SupplierPart;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockItem::PartId).integer().not_null())
                    .col(ColumnDef::new(StockItem::SupplierPartId).integer().null())
                    .col(ColumnDef::new(StockItem::LocationId).integer().null())
                    .col(ColumnDef::new(StockItem::BelongsToId).integer().null())
                    .col(ColumnDef::new(StockItem::Serial).integer().null())
                    .col(ColumnDef::new(StockItem::Batch).string_len(100).null())
                    .col(ColumnDef::new(StockItem::Url).string().null())
                    .col(
                        ColumnDef::new(StockItem::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(StockItem::Status)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(StockItem::Updated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockItem::StocktakeDate).date().null())
                    .col(ColumnDef::new(StockItem::StocktakeUser).string_len(150).null())
                    .col(
                        ColumnDef::new(StockItem::ReviewNeeded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StockItem::Infinite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(StockItem::Notes).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_item_part")
                            .from(StockItem::Table, StockItem::PartId)
                            .to(Part::Table, Part::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_item_supplier_part")
                            .from(StockItem::Table, StockItem::SupplierPartId)
                            .to(SupplierPart::Table, SupplierPart::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_item_location")
                            .from(StockItem::Table, StockItem::LocationId)
                            .to(StockLocation::Table, StockLocation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_item_belongs_to")
                            .from(StockItem::Table, StockItem::BelongsToId)
                            .to(StockItem::Table, StockItem::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_item_location")
                    .table(StockItem::Table)
                    .col(StockItem::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockItemTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockItemTracking::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockItemTracking::ItemId).integer().not_null())
                    .col(
                        ColumnDef::new(StockItemTracking::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockItemTracking::Title)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockItemTracking::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(StockItemTracking::User).string_len(150).null())
                    .col(
                        ColumnDef::new(StockItemTracking::System)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StockItemTracking::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_item_tracking_item")
                            .from(StockItemTracking::Table, StockItemTracking::ItemId)
                            .to(StockItem::Table, StockItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockItemTracking::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StockItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StockItem {
    Table,
    Id,
    PartId,
    SupplierPartId,
    LocationId,
    BelongsToId,
    Serial,
    Batch,
    Url,
    Quantity,
    Status,
    Updated,
    StocktakeDate,
    StocktakeUser,
    ReviewNeeded,
    Infinite,
    Notes,
}

#[derive(DeriveIden)]
enum StockItemTracking {
    Table,
    Id,
    ItemId,
    Date,
    Title,
    Notes,
    User,
    System,
    Quantity,
}
