use sea_orm_migration::prelude::*;

use crate::m20180415_000001_create_tree_tables::{PartCategory, StockLocation};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Part::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Part::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Part::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Part::Description)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Part::Ipn).string_len(100).null())
                    .col(ColumnDef::new(Part::Url).string().null())
                    .col(ColumnDef::new(Part::CategoryId).integer().null())
                    .col(ColumnDef::new(Part::DefaultLocationId).integer().null())
                    .col(ColumnDef::new(Part::Units).string_len(20).not_null().default(""))
                    .col(
                        ColumnDef::new(Part::MinimumStock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Part::Trackable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Part::Buildable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Part::Consumable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Part::Purchaseable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Part::Salable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Part::Notes).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_part_category")
                            .from(Part::Table, Part::CategoryId)
                            .to(PartCategory::Table, PartCategory::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_part_default_location")
                            .from(Part::Table, Part::DefaultLocationId)
                            .to(StockLocation::Table, StockLocation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BomItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BomItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BomItem::PartId).integer().not_null())
                    .col(ColumnDef::new(BomItem::SubPartId).integer().not_null())
                    .col(
                        ColumnDef::new(BomItem::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(BomItem::Note).string_len(100).not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bom_item_part")
                            .from(BomItem::Table, BomItem::PartId)
                            .to(Part::Table, Part::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bom_item_sub_part")
                            .from(BomItem::Table, BomItem::SubPartId)
                            .to(Part::Table, Part::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bom_item_part_sub_part")
                    .table(BomItem::Table)
                    .col(BomItem::PartId)
                    .col(BomItem::SubPartId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BomItem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Part::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Part {
    Table,
    Id,
    Name,
    Description,
    Ipn,
    Url,
    CategoryId,
    DefaultLocationId,
    Units,
    MinimumStock,
    Trackable,
    Buildable,
    Consumable,
    Purchaseable,
    Salable,
    Notes,
}

#[derive(DeriveIden)]
enum BomItem {
    Table,
    Id,
    PartId,
    SubPartId,
    Quantity,
    Note,
}
