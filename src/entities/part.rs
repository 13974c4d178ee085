use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "part")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Internal part number
    pub ipn: Option<String>,
    pub url: Option<String>,
    pub category_id: Option<i32>,
    pub default_location_id: Option<i32>,
    pub units: String,
    pub minimum_stock: i32,
    pub trackable: bool,
    pub buildable: bool,
    pub consumable: bool,
    pub purchaseable: bool,
    pub salable: bool,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::part_category::Entity",
        from = "Column::CategoryId",
        to = "super::part_category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::stock_location::Entity",
        from = "Column::DefaultLocationId",
        to = "super::stock_location::Column::Id",
        on_delete = "SetNull"
    )]
    DefaultLocation,
    #[sea_orm(has_many = "super::stock_item::Entity")]
    StockItems,
    #[sea_orm(has_many = "super::build::Entity")]
    Builds,
    #[sea_orm(has_many = "super::supplier_part::Entity")]
    SupplierParts,
}

impl Related<super::part_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItems.def()
    }
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Builds.def()
    }
}

impl Related<super::supplier_part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierParts.def()
    }
}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/part/{}/", self.id)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

impl ActiveModelBehavior for ActiveModel {}
