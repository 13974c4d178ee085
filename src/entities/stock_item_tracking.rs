use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only history entry for a stock item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_item_tracking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_id: i32,
    pub date: DateTime<Utc>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub user: Option<String>,
    /// Entry was written by the system rather than typed by a user
    pub system: bool,
    /// Item quantity after the recorded change
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_item::Entity",
        from = "Column::ItemId",
        to = "super::stock_item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/stock/track/{}/", self.id)
    }
}

impl ActiveModelBehavior for ActiveModel {}
