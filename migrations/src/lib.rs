pub use sea_orm_migration::prelude::*;

mod m20180415_000001_create_tree_tables;
mod m20180415_000002_create_part_tables;
mod m20180416_000003_create_supplier_tables;
mod m20180417_000004_create_stock_tables;
mod m20180422_000005_create_build_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20180415_000001_create_tree_tables::Migration),
            Box::new(m20180415_000002_create_part_tables::Migration),
            Box::new(m20180416_000003_create_supplier_tables::Migration),
            Box::new(m20180417_000004_create_stock_tables::Migration),
            Box::new(m20180422_000005_create_build_table::Migration),
        ]
    }
}
