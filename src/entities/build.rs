use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Display,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum BuildStatus {
    #[sea_orm(num_value = 10)]
    Pending,
    #[sea_orm(num_value = 20)]
    Holding,
    #[sea_orm(num_value = 30)]
    Cancelled,
    #[sea_orm(num_value = 40)]
    Complete,
}

impl BuildStatus {
    /// Pending and held builds still count against stock.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Holding)
    }

    pub fn active() -> [BuildStatus; 2] {
        [Self::Pending, Self::Holding]
    }
}

impl Default for BuildStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "build")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub part_id: i32,
    pub title: String,
    /// Batch code for this build output
    pub batch: Option<String>,
    pub status: BuildStatus,
    pub creation_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    /// Number of parts to build
    pub quantity: i32,
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
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl Model {
    pub fn absolute_url(&self) -> String {
        format!("/build/{}/", self.id)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl ActiveModelBehavior for ActiveModel {}
