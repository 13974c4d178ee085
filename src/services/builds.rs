use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    db::{self, DbPool},
    entities::{
        bom_item::{self, Entity as BomItemEntity},
        build::{self, BuildStatus, Entity as BuildEntity},
        part::{self, Entity as PartEntity},
    },
    errors::ServiceError,
    services::parts::find_part,
};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBuild {
    pub part_id: i32,
    #[validate(length(min = 1, max = 100, message = "Build title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub batch: Option<String>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Build quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
}

impl NewBuild {
    pub fn new(part_id: i32, title: impl Into<String>, quantity: i32) -> Self {
        Self {
            part_id,
            title: title.into(),
            batch: None,
            quantity,
            notes: String::new(),
        }
    }
}

/// One component a build consumes.
#[derive(Debug, Clone, Serialize)]
pub struct RequiredPart {
    pub part: part::Model,
    /// Quantity per assembled unit, from the BOM line
    pub per_unit: i32,
    pub quantity: i64,
}

/// Checks that a build may move from `from` to `to`.
pub fn check_transition(from: BuildStatus, to: BuildStatus) -> Result<(), ServiceError> {
    use crate::entities::build::BuildStatus::*;

    let allowed = matches!(
        (from, to),
        (Pending, Holding)
            | (Holding, Pending)
            | (Pending | Holding, Cancelled)
            | (Pending | Holding, Complete)
    );

    if allowed {
        Ok(())
    } else {
        Err(ServiceError::InvalidStatus(format!(
            "Cannot change build status from {} to {}",
            from, to
        )))
    }
}

/// Build orders: assembling a quantity of a buildable part from its BOM.
#[derive(Clone)]
pub struct BuildService {
    db: Arc<DbPool>,
}

impl BuildService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(title = %input.title))]
    pub async fn create_build(&self, input: NewBuild) -> Result<build::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        let part = find_part(db, input.part_id).await?;
        if !part.buildable {
            return Err(ServiceError::ValidationError(format!(
                "Part '{}' is not buildable",
                part.name
            )));
        }

        let created = build::ActiveModel {
            part_id: Set(part.id),
            title: Set(input.title),
            batch: Set(input.batch),
            status: Set(BuildStatus::Pending),
            creation_date: Set(Utc::now().date_naive()),
            completion_date: Set(None),
            quantity: Set(input.quantity),
            notes: Set(input.notes),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(build_id = created.id, part_id = part.id, quantity = created.quantity, "Build created");
        Ok(created)
    }

    pub async fn get_build(&self, id: i32) -> Result<build::Model, ServiceError> {
        find_build(&*self.db, id).await
    }

    /// Builds, newest first, optionally restricted to one status.
    pub async fn list_builds(
        &self,
        status: Option<BuildStatus>,
    ) -> Result<Vec<build::Model>, ServiceError> {
        let mut query = BuildEntity::find().order_by_desc(build::Column::Id);
        if let Some(status) = status {
            query = query.filter(build::Column::Status.eq(status));
        }
        Ok(query.all(&*self.db).await?)
    }

    /// Pending and held builds of a part.
    pub async fn active_builds(&self, part_id: i32) -> Result<Vec<build::Model>, ServiceError> {
        Ok(BuildEntity::find()
            .filter(build::Column::PartId.eq(part_id))
            .filter(build::Column::Status.is_in(BuildStatus::active()))
            .order_by_asc(build::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn hold(&self, id: i32) -> Result<build::Model, ServiceError> {
        self.transition(id, BuildStatus::Holding).await
    }

    pub async fn resume(&self, id: i32) -> Result<build::Model, ServiceError> {
        self.transition(id, BuildStatus::Pending).await
    }

    pub async fn cancel(&self, id: i32) -> Result<build::Model, ServiceError> {
        self.transition(id, BuildStatus::Cancelled).await
    }

    /// Marks a build complete and stamps today's date on it.
    pub async fn complete(&self, id: i32) -> Result<build::Model, ServiceError> {
        self.transition(id, BuildStatus::Complete).await
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: i32, to: BuildStatus) -> Result<build::Model, ServiceError> {
        db::transaction(&self.db, "builds.transition", move |txn| {
            Box::pin(async move {
                let build = find_build(txn, id).await?;
                let from = build.status;
                check_transition(from, to)?;

                let mut active: build::ActiveModel = build.into();
                active.status = Set(to);
                if to == BuildStatus::Complete {
                    active.completion_date = Set(Some(Utc::now().date_naive()));
                }
                let updated = active.update(txn).await?;

                info!(build_id = id, %from, %to, "Build status changed");
                Ok(updated)
            })
        })
        .await
    }

    /// Components needed for the whole build: BOM quantity times build quantity.
    pub async fn required_parts(&self, id: i32) -> Result<Vec<RequiredPart>, ServiceError> {
        let db = &*self.db;
        let build = find_build(db, id).await?;

        let lines = BomItemEntity::find()
            .filter(bom_item::Column::PartId.eq(build.part_id))
            .order_by_asc(bom_item::Column::Id)
            .all(db)
            .await?;

        let sub_part_ids: Vec<i32> = lines.iter().map(|l| l.sub_part_id).collect();
        let parts: HashMap<i32, part::Model> = PartEntity::find()
            .filter(part::Column::Id.is_in(sub_part_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        lines
            .into_iter()
            .map(|line| {
                let part = parts
                    .get(&line.sub_part_id)
                    .cloned()
                    .ok_or_else(|| ServiceError::not_found("Part", line.sub_part_id))?;
                Ok(RequiredPart {
                    part,
                    per_unit: line.quantity,
                    quantity: i64::from(line.quantity) * i64::from(build.quantity),
                })
            })
            .collect()
    }
}

async fn find_build<C: ConnectionTrait>(conn: &C, id: i32) -> Result<build::Model, ServiceError> {
    BuildEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Build", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use crate::entities::build::BuildStatus::*;

    #[rstest]
    #[case(Pending, Holding)]
    #[case(Holding, Pending)]
    #[case(Pending, Cancelled)]
    #[case(Holding, Cancelled)]
    #[case(Pending, Complete)]
    #[case(Holding, Complete)]
    fn allowed_transitions(#[case] from: BuildStatus, #[case] to: BuildStatus) {
        assert!(check_transition(from, to).is_ok());
    }

    #[rstest]
    #[case(Complete, Pending)]
    #[case(Complete, Cancelled)]
    #[case(Cancelled, Pending)]
    #[case(Cancelled, Complete)]
    #[case(Pending, Pending)]
    #[case(Holding, Holding)]
    fn rejected_transitions(#[case] from: BuildStatus, #[case] to: BuildStatus) {
        assert_matches!(check_transition(from, to), Err(ServiceError::InvalidStatus(_)));
    }
}
