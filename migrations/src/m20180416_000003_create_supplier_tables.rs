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
                    .table(Supplier::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Supplier::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Supplier::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Supplier::Description)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Supplier::Website).string().null())
                    .col(ColumnDef::new(Supplier::Email).string().null())
                    .col(ColumnDef::new(Supplier::Phone).string_len(50).null())
                    .col(ColumnDef::new(Supplier::Notes).text().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplierPart::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplierPart::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupplierPart::PartId).integer().not_null())
                    .col(ColumnDef::new(SupplierPart::SupplierId).integer().not_null())
                    .col(ColumnDef::new(SupplierPart::Sku).string_len(100).not_null())
                    .col(ColumnDef::new(SupplierPart::Manufacturer).string_len(100).null())
                    .col(ColumnDef::new(SupplierPart::Mpn).string_len(100).null())
                    .col(ColumnDef::new(SupplierPart::Url).string().null())
                    .col(
                        ColumnDef::new(SupplierPart::Description)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(SupplierPart::SinglePrice).decimal_len(10, 3).null())
                    .col(
                        ColumnDef::new(SupplierPart::BaseCost)
                            .decimal_len(10, 3)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SupplierPart::Multiple)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SupplierPart::Minimum)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(SupplierPart::LeadTimeDays).integer().null())
                    .col(ColumnDef::new(SupplierPart::Packaging).string_len(50).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_part_part")
                            .from(SupplierPart::Table, SupplierPart::PartId)
                            .to(Part::Table, Part::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_part_supplier")
                            .from(SupplierPart::Table, SupplierPart::SupplierId)
                            .to(Supplier::Table, Supplier::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supplier_part_unique_sku")
                    .table(SupplierPart::Table)
                    .col(SupplierPart::PartId)
                    .col(SupplierPart::SupplierId)
                    .col(SupplierPart::Sku)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupplierPart::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Supplier::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Supplier {
    Table,
    Id,
    Name,
    Description,
    Website,
    Email,
    Phone,
    Notes,
}

#[derive(DeriveIden)]
pub(crate) enum SupplierPart {
    Table,
    Id,
    PartId,
    SupplierId,
    Sku,
    Manufacturer,
    Mpn,
    Url,
    Description,
    SinglePrice,
    BaseCost,
    Multiple,
    Minimum,
    LeadTimeDays,
    Packaging,
}
