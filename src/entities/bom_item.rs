use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of a bill of materials: `quantity` of `sub_part_id` go into one `part_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bom_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub part_id: i32,
    pub sub_part_id: i32,
    pub quantity: i32,
    pub note: String,
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
        belongs_to = "super::part::Entity",
        from = "Column::SubPartId",
        to = "super::part::Column::Id",
        on_delete = "Cascade"
    )]
    SubPart,
}

impl ActiveModelBehavior for ActiveModel {}
