use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Display,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum StockStatus {
    #[sea_orm(num_value = 10)]
    #[strum(serialize = "OK")]
    Ok,
    #[sea_orm(num_value = 50)]
    #[strum(serialize = "Attention needed")]
    Attention,
    #[sea_orm(num_value = 55)]
    #[strum(serialize = "Damaged")]
    Damaged,
    #[sea_orm(num_value = 60)]
    #[strum(serialize = "Destroyed")]
    Destroyed,
}

impl Default for StockStatus {
    fn default() -> Self {
        Self::Ok
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub part_id: i32,
    pub supplier_part_id: Option<i32>,
    /// `None` once the item's root location has been deleted
    pub location_id: Option<i32>,
    /// Parent stock item this one is installed in
    pub belongs_to_id: Option<i32>,
    pub serial: Option<i32>,
    pub batch: Option<String>,
    pub url: Option<String>,
    pub quantity: i32,
    pub status: StockStatus,
    pub updated: DateTime<Utc>,
    pub stocktake_date: Option<NaiveDate>,
    pub stocktake_user: Option<String>,
    pub review_needed: bool,
    /// Infinite stock is never counted or adjusted
    pub infinite: bool,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
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
        belongs_to = "super::supplier_part::Entity",
        from = "Column::SupplierPartId",
        to = "super::supplier_part::Column::Id",
        on_delete = "SetNull"
    )]
    SupplierPart,
    #[sea_orm(
        belongs_to = "super::stock_location::Entity",
        from = "Column::LocationId",
        to = "super::stock_location::Column::Id",
        on_delete = "SetNull"
    )]
    Location,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BelongsToId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    BelongsTo,
    #[sea_orm(has_many = "super::stock_item_tracking::Entity")]
    TrackingInfo,
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl Related<super::stock_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::stock_item_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackingInfo.def()
    }
}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/stock/item/{}/", self.id)
    }

    /// Human readable label, e.g. `4000 x M2x4 LPHS @ Dining Room`.
    pub fn label(&self, part_name: &str, location_name: Option<&str>) -> String {
        match location_name {
            Some(location) => format!("{} x {} @ {}", self.quantity, part_name, location),
            None => format!("{} x {}", self.quantity, part_name),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
