use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_part")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub part_id: i32,
    pub supplier_id: i32,
    pub sku: String,
    pub manufacturer: Option<String>,
    /// Manufacturer part number
    pub mpn: Option<String>,
    pub url: Option<String>,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))", nullable)]
    pub single_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub base_cost: Decimal,
    /// Parts must be ordered in multiples of this
    pub multiple: i32,
    /// Minimum order quantity
    pub minimum: i32,
    pub lead_time_days: Option<i32>,
    pub packaging: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::part::Entity",
        from = "Column::PartId",
        to = "super::part::Column::Id",
        on_delete = "Cascade"
    )]
    Part,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_delete = "Cascade"
    )]
    Supplier,
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Model {
    /// Quantity that actually has to be ordered to receive at least `quantity` units.
    pub fn order_quantity(&self, quantity: i32) -> i64 {
        let multiple = i64::from(self.multiple.max(1));
        let mut ordered = i64::from(quantity.max(self.minimum).max(0));
        let remainder = ordered % multiple;
        if remainder != 0 {
            ordered += multiple - remainder;
        }
        ordered
    }

    /// Total cost of buying `quantity` units, or `None` when no unit price is known
    /// or the total does not fit in a `Decimal`.
    pub fn price_for(&self, quantity: i32) -> Option<Decimal> {
        let unit = self.single_price?;
        let ordered = Decimal::from(self.order_quantity(quantity));
        unit.checked_mul(ordered)?.checked_add(self.base_cost)
    }
}

impl ActiveModelBehavior for ActiveModel {}
