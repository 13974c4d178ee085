use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    db::{self, DbPool},
    entities::{
        part::{self, Entity as PartEntity},
        stock_item::{self, Entity as StockItemEntity, StockStatus},
        stock_item_tracking::{self, Entity as TrackingEntity},
        stock_location::{self, Entity as LocationEntity},
        supplier_part::Entity as SupplierPartEntity,
    },
    errors::ServiceError,
    tree::TreeIndex,
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewStockLocation {
    #[validate(length(min = 1, max = 100, message = "Location name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl NewStockLocation {
    pub fn new(name: impl Into<String>, parent_id: Option<i32>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parent_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewStockItem {
    pub part_id: i32,
    #[serde(default)]
    pub location_id: Option<i32>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[serde(default)]
    pub supplier_part_id: Option<i32>,
    #[serde(default)]
    pub belongs_to_id: Option<i32>,
    #[serde(default)]
    pub serial: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub batch: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: StockStatus,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default)]
    pub notes: String,
}

impl NewStockItem {
    pub fn new(part_id: i32, location_id: Option<i32>, quantity: i32) -> Self {
        Self {
            part_id,
            location_id,
            quantity,
            ..Default::default()
        }
    }
}

/// Narrows [`StockService::list_stock_items`].
#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    pub part_id: Option<i32>,
    pub location_id: Option<i32>,
    /// With `location_id`, also match items in every sublocation
    pub include_sublocations: bool,
}

/// A quantity change applied to a single stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// Overwrite the recorded quantity with a physical count
    Stocktake(i32),
    Add(i32),
    Take(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    pub quantity: i32,
    pub title: String,
}

impl StockAdjustment {
    /// Works out the new quantity and tracking title without touching storage.
    pub fn apply(self, item: &stock_item::Model) -> Result<AdjustmentOutcome, ServiceError> {
        if item.infinite {
            return Err(ServiceError::InvalidOperation(format!(
                "Stock item {} has infinite stock and cannot be adjusted",
                item.id
            )));
        }

        if let Some(serial) = item.serial {
            self.check_serialized(serial, item.quantity)?;
        }

        match self {
            Self::Stocktake(count) if count < 0 => Err(ServiceError::ValidationError(format!(
                "Stocktake count cannot be negative (got {})",
                count
            ))),
            Self::Stocktake(count) => Ok(AdjustmentOutcome {
                quantity: count,
                title: format!("Stocktake - counted {} items", count),
            }),
            Self::Add(n) | Self::Take(n) if n <= 0 => Err(ServiceError::ValidationError(format!(
                "Quantity must be greater than zero (got {})",
                n
            ))),
            Self::Add(n) => Ok(AdjustmentOutcome {
                quantity: item.quantity.checked_add(n).ok_or_else(|| {
                    ServiceError::ValidationError("Resulting quantity is too large".to_string())
                })?,
                title: format!("Added {} items", n),
            }),
            Self::Take(n) => Ok(AdjustmentOutcome {
                quantity: (item.quantity - n).max(0),
                title: format!("Removed {} items", n),
            }),
        }
    }

    /// A serialized item holds at most one unit.
    fn check_serialized(self, serial: i32, quantity: i32) -> Result<(), ServiceError> {
        let rejected = match self {
            Self::Add(_) => true,
            Self::Stocktake(count) => count > 1,
            Self::Take(n) => n > quantity,
        };
        if rejected {
            return Err(ServiceError::ValidationError(format!(
                "Stock item with serial number {} can only hold a quantity of 0 or 1",
                serial
            )));
        }
        Ok(())
    }
}

/// Result of a successful stock mutation: the updated item and the history entry it wrote.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedChange {
    pub item: stock_item::Model,
    pub entry: stock_item_tracking::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationDeletion {
    pub location_id: i32,
    /// Location that inherited the stock and sublocations
    pub new_parent_id: Option<i32>,
    pub moved_items: u64,
    pub moved_children: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationDetail {
    pub location: stock_location::Model,
    pub pathstring: String,
    pub depth: usize,
    pub has_children: bool,
    pub item_count: u64,
}

/// Stock locations, stock items and their tracking history.
#[derive(Clone)]
pub struct StockService {
    db: Arc<DbPool>,
}

impl StockService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    // ----- locations -----

    #[instrument(skip(self))]
    pub async fn create_location(
        &self,
        input: NewStockLocation,
    ) -> Result<stock_location::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if let Some(parent_id) = input.parent_id {
            find_location(db, parent_id).await?;
        }

        let created = stock_location::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            parent_id: Set(input.parent_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(location_id = created.id, name = %created.name, "Stock location created");
        Ok(created)
    }

    pub async fn get_location(&self, id: i32) -> Result<stock_location::Model, ServiceError> {
        find_location(&*self.db, id).await
    }

    pub async fn list_locations(&self) -> Result<Vec<stock_location::Model>, ServiceError> {
        Ok(LocationEntity::find()
            .order_by_asc(stock_location::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn location_tree(&self) -> Result<TreeIndex, ServiceError> {
        load_location_tree(&*self.db).await
    }

    pub async fn pathstring(&self, id: i32) -> Result<String, ServiceError> {
        Ok(self.location_tree().await?.pathstring(id)?)
    }

    /// Ancestors of `id`, root first.
    pub async fn parent_locations(
        &self,
        id: i32,
    ) -> Result<Vec<stock_location::Model>, ServiceError> {
        let ids = self.location_tree().await?.parents(id)?;
        let mut by_id = LocationEntity::find()
            .filter(stock_location::Column::Id.is_in(ids.clone()))
            .all(&*self.db)
            .await?;
        by_id.sort_by_key(|loc| ids.iter().position(|p| *p == loc.id));
        Ok(by_id)
    }

    pub async fn child_locations(
        &self,
        id: i32,
    ) -> Result<Vec<stock_location::Model>, ServiceError> {
        find_location(&*self.db, id).await?;
        Ok(LocationEntity::find()
            .filter(stock_location::Column::ParentId.eq(id))
            .order_by_asc(stock_location::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn has_children(&self, id: i32) -> Result<bool, ServiceError> {
        let tree = self.location_tree().await?;
        if !tree.contains(id) {
            return Err(ServiceError::not_found("Stock location", id));
        }
        Ok(tree.has_children(id))
    }

    /// Ids of `id` and every location below it.
    pub async fn unique_children(&self, id: i32) -> Result<BTreeSet<i32>, ServiceError> {
        Ok(self.location_tree().await?.unique_children(id)?)
    }

    /// Moves a location below `parent_id` (or to the top level with `None`).
    #[instrument(skip(self))]
    pub async fn move_location(
        &self,
        id: i32,
        parent_id: Option<i32>,
    ) -> Result<stock_location::Model, ServiceError> {
        db::transaction(&self.db, "stock.move_location", move |txn| {
            Box::pin(async move {
                let mut tree = load_location_tree(txn).await?;
                tree.set_parent(id, parent_id)?;

                let location = find_location(txn, id).await?;
                let mut active: stock_location::ActiveModel = location.into();
                active.parent_id = Set(parent_id);
                let updated = active.update(txn).await?;

                info!(location_id = id, ?parent_id, "Stock location moved");
                Ok(updated)
            })
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn rename_location(
        &self,
        id: i32,
        name: String,
        description: Option<String>,
    ) -> Result<stock_location::Model, ServiceError> {
        let check = NewStockLocation {
            name: name.clone(),
            description: description.clone().unwrap_or_default(),
            parent_id: None,
        };
        check.validate()?;

        let location = find_location(&*self.db, id).await?;
        let mut active: stock_location::ActiveModel = location.into();
        active.name = Set(name);
        if let Some(description) = description {
            active.description = Set(description);
        }
        Ok(active.update(&*self.db).await?)
    }

    pub async fn stock_items(&self, location_id: i32) -> Result<Vec<stock_item::Model>, ServiceError> {
        find_location(&*self.db, location_id).await?;
        Ok(StockItemEntity::find()
            .filter(stock_item::Column::LocationId.eq(location_id))
            .order_by_asc(stock_item::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn has_items(&self, location_id: i32) -> Result<bool, ServiceError> {
        find_location(&*self.db, location_id).await?;
        let count = StockItemEntity::find()
            .filter(stock_item::Column::LocationId.eq(location_id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    /// Number of stock items in this location and all of its sublocations.
    pub async fn item_count(&self, location_id: i32) -> Result<u64, ServiceError> {
        let ids = self.unique_children(location_id).await?;
        Ok(StockItemEntity::find()
            .filter(stock_item::Column::LocationId.is_in(ids))
            .count(&*self.db)
            .await?)
    }

    pub async fn location_detail(&self, id: i32) -> Result<LocationDetail, ServiceError> {
        let tree = self.location_tree().await?;
        let location = self.get_location(id).await?;
        let item_count = StockItemEntity::find()
            .filter(stock_item::Column::LocationId.is_in(tree.unique_children(id)?))
            .count(&*self.db)
            .await?;

        Ok(LocationDetail {
            pathstring: tree.pathstring(id)?,
            depth: tree.depth(id)?,
            has_children: tree.has_children(id),
            item_count,
            location,
        })
    }

    /// Deletes a location. Its stock items, sublocations and any parts using it
    /// as their default location are handed to its parent.
    #[instrument(skip(self))]
    pub async fn delete_location(&self, id: i32) -> Result<LocationDeletion, ServiceError> {
        db::transaction(&self.db, "stock.delete_location", move |txn| {
            Box::pin(async move {
                let mut tree = load_location_tree(txn).await?;
                let new_parent_id = tree.remove(id)?;

                let moved_items = StockItemEntity::update_many()
                    .col_expr(stock_item::Column::LocationId, Expr::value(new_parent_id))
                    .filter(stock_item::Column::LocationId.eq(id))
                    .exec(txn)
                    .await?
                    .rows_affected;

                let moved_children = LocationEntity::update_many()
                    .col_expr(stock_location::Column::ParentId, Expr::value(new_parent_id))
                    .filter(stock_location::Column::ParentId.eq(id))
                    .exec(txn)
                    .await?
                    .rows_affected;

                PartEntity::update_many()
                    .col_expr(part::Column::DefaultLocationId, Expr::value(new_parent_id))
                    .filter(part::Column::DefaultLocationId.eq(id))
                    .exec(txn)
                    .await?;

                LocationEntity::delete_by_id(id).exec(txn).await?;

                if new_parent_id.is_none() && moved_items > 0 {
                    warn!(
                        location_id = id,
                        moved_items, "Deleted a top level location; its stock now has no location"
                    );
                }
                info!(
                    location_id = id,
                    ?new_parent_id,
                    moved_items,
                    moved_children,
                    "Stock location deleted"
                );

                Ok(LocationDeletion {
                    location_id: id,
                    new_parent_id,
                    moved_items,
                    moved_children,
                })
            })
        })
        .await
    }

    // ----- stock items -----

    #[instrument(skip(self))]
    pub async fn create_stock_item(
        &self,
        input: NewStockItem,
        user: Option<&str>,
    ) -> Result<TrackedChange, ServiceError> {
        input.validate()?;
        let user = user.map(str::to_owned);

        db::transaction(&self.db, "stock.create_item", move |txn| {
            Box::pin(async move {
                let part = PartEntity::find_by_id(input.part_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Part", input.part_id))?;

                if let Some(location_id) = input.location_id {
                    find_location(txn, location_id).await?;
                }

                if let Some(supplier_part_id) = input.supplier_part_id {
                    let supplier_part = SupplierPartEntity::find_by_id(supplier_part_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("Supplier part", supplier_part_id))?;
                    if supplier_part.part_id != part.id {
                        return Err(ServiceError::ValidationError(format!(
                            "Supplier part {} does not match part {}",
                            supplier_part_id, part.id
                        )));
                    }
                }

                if let Some(parent_id) = input.belongs_to_id {
                    find_item(txn, parent_id).await?;
                }

                match input.serial {
                    Some(serial) => {
                        if input.quantity != 1 {
                            return Err(ServiceError::ValidationError(
                                "Quantity must be 1 for an item with a serial number".to_string(),
                            ));
                        }
                        let taken = StockItemEntity::find()
                            .filter(stock_item::Column::PartId.eq(part.id))
                            .filter(stock_item::Column::Serial.eq(serial))
                            .count(txn)
                            .await?;
                        if taken > 0 {
                            return Err(ServiceError::Conflict(format!(
                                "Serial number {} already exists for part {}",
                                serial, part.name
                            )));
                        }
                    }
                    None if part.trackable => {
                        return Err(ServiceError::ValidationError(format!(
                            "Part {} is trackable and requires a serial number",
                            part.name
                        )));
                    }
                    None => {}
                }

                let item = stock_item::ActiveModel {
                    part_id: Set(part.id),
                    supplier_part_id: Set(input.supplier_part_id),
                    location_id: Set(input.location_id),
                    belongs_to_id: Set(input.belongs_to_id),
                    serial: Set(input.serial),
                    batch: Set(input.batch),
                    url: Set(input.url),
                    quantity: Set(input.quantity),
                    status: Set(input.status),
                    updated: Set(Utc::now()),
                    stocktake_date: Set(None),
                    stocktake_user: Set(None),
                    review_needed: Set(false),
                    infinite: Set(input.infinite),
                    notes: Set(input.notes),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                let entry = record(
                    txn,
                    &item,
                    "Created stock item".to_string(),
                    String::new(),
                    user,
                    true,
                )
                .await?;

                info!(item_id = item.id, part_id = part.id, quantity = item.quantity, "Stock item created");
                Ok(TrackedChange { item, entry })
            })
        })
        .await
    }

    pub async fn get_stock_item(&self, id: i32) -> Result<stock_item::Model, ServiceError> {
        find_item(&*self.db, id).await
    }

    pub async fn list_stock_items(
        &self,
        filter: StockFilter,
    ) -> Result<Vec<stock_item::Model>, ServiceError> {
        let mut query = StockItemEntity::find().order_by_asc(stock_item::Column::Id);

        if let Some(part_id) = filter.part_id {
            query = query.filter(stock_item::Column::PartId.eq(part_id));
        }
        if let Some(location_id) = filter.location_id {
            if filter.include_sublocations {
                let ids = self.unique_children(location_id).await?;
                query = query.filter(stock_item::Column::LocationId.is_in(ids));
            } else {
                query = query.filter(stock_item::Column::LocationId.eq(location_id));
            }
        }

        Ok(query.all(&*self.db).await?)
    }

    pub async fn count_stock_items(&self) -> Result<u64, ServiceError> {
        Ok(StockItemEntity::find().count(&*self.db).await?)
    }

    /// Label such as `4000 x M2x4 LPHS @ Dining Room`.
    pub async fn stock_item_label(&self, id: i32) -> Result<String, ServiceError> {
        let db = &*self.db;
        let item = find_item(db, id).await?;
        let part_name = PartEntity::find_by_id(item.part_id)
            .select_only()
            .column(part::Column::Name)
            .into_tuple::<String>()
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Part", item.part_id))?;

        let location_name = match item.location_id {
            Some(location_id) => Some(find_location(db, location_id).await?.name),
            None => None,
        };

        Ok(item.label(&part_name, location_name.as_deref()))
    }

    /// Moves an item to another location. Moving to the current location is rejected.
    #[instrument(skip(self, notes))]
    pub async fn move_item(
        &self,
        item_id: i32,
        location_id: i32,
        notes: &str,
        user: Option<&str>,
    ) -> Result<TrackedChange, ServiceError> {
        let notes = notes.to_owned();
        let user = user.map(str::to_owned);

        db::transaction(&self.db, "stock.move_item", move |txn| {
            Box::pin(async move {
                let item = find_item(txn, item_id).await?;
                if item.location_id == Some(location_id) {
                    return Err(ServiceError::InvalidOperation(format!(
                        "Stock item {} is already in location {}",
                        item_id, location_id
                    )));
                }

                let destination = find_location(txn, location_id).await?;
                let title = match item.location_id {
                    Some(old_id) => {
                        let origin = find_location(txn, old_id).await?;
                        format!("Moved to {} (from {})", destination.name, origin.name)
                    }
                    None => format!("Moved to {}", destination.name),
                };

                let mut active: stock_item::ActiveModel = item.into();
                active.location_id = Set(Some(location_id));
                active.updated = Set(Utc::now());
                let item = active.update(txn).await?;

                let entry = record(txn, &item, title, notes, user, true).await?;
                info!(item_id, location_id, "Stock item moved");
                Ok(TrackedChange { item, entry })
            })
        })
        .await
    }

    /// Applies a quantity adjustment and records it. Invalid adjustments change nothing.
    #[instrument(skip(self, notes))]
    pub async fn adjust(
        &self,
        item_id: i32,
        adjustment: StockAdjustment,
        notes: &str,
        user: Option<&str>,
    ) -> Result<TrackedChange, ServiceError> {
        let notes = notes.to_owned();
        let user = user.map(str::to_owned);

        db::transaction(&self.db, "stock.adjust", move |txn| {
            Box::pin(async move {
                let item = find_item(txn, item_id).await?;
                let outcome = adjustment.apply(&item)?;
                let previous = item.quantity;

                let mut active: stock_item::ActiveModel = item.into();
                active.quantity = Set(outcome.quantity);
                active.updated = Set(Utc::now());
                if let StockAdjustment::Stocktake(_) = adjustment {
                    active.stocktake_date = Set(Some(Utc::now().date_naive()));
                    active.stocktake_user = Set(user.clone());
                }
                let item = active.update(txn).await?;

                let entry = record(txn, &item, outcome.title, notes, user, true).await?;
                info!(
                    item_id,
                    previous,
                    quantity = item.quantity,
                    ?adjustment,
                    "Stock quantity adjusted"
                );
                Ok(TrackedChange { item, entry })
            })
        })
        .await
    }

    pub async fn stocktake(
        &self,
        item_id: i32,
        count: i32,
        user: Option<&str>,
        notes: &str,
    ) -> Result<TrackedChange, ServiceError> {
        self.adjust(item_id, StockAdjustment::Stocktake(count), notes, user)
            .await
    }

    pub async fn add_stock(
        &self,
        item_id: i32,
        quantity: i32,
        user: Option<&str>,
        notes: &str,
    ) -> Result<TrackedChange, ServiceError> {
        self.adjust(item_id, StockAdjustment::Add(quantity), notes, user)
            .await
    }

    /// Removes stock. The quantity never drops below zero.
    pub async fn take_stock(
        &self,
        item_id: i32,
        quantity: i32,
        user: Option<&str>,
        notes: &str,
    ) -> Result<TrackedChange, ServiceError> {
        self.adjust(item_id, StockAdjustment::Take(quantity), notes, user)
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        item_id: i32,
        status: StockStatus,
        user: Option<&str>,
    ) -> Result<TrackedChange, ServiceError> {
        let user = user.map(str::to_owned);

        db::transaction(&self.db, "stock.set_status", move |txn| {
            Box::pin(async move {
                let item = find_item(txn, item_id).await?;
                if item.status == status {
                    return Err(ServiceError::InvalidOperation(format!(
                        "Stock item {} already has status {}",
                        item_id, status
                    )));
                }

                let mut active: stock_item::ActiveModel = item.into();
                active.status = Set(status);
                active.review_needed = Set(status != StockStatus::Ok);
                active.updated = Set(Utc::now());
                let item = active.update(txn).await?;

                let title = format!("Status changed to {}", status);
                let entry = record(txn, &item, title, String::new(), user, true).await?;
                Ok(TrackedChange { item, entry })
            })
        })
        .await
    }

    /// Appends a user-written note to an item's history.
    pub async fn add_note(
        &self,
        item_id: i32,
        title: &str,
        notes: &str,
        user: Option<&str>,
    ) -> Result<stock_item_tracking::Model, ServiceError> {
        if title.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Tracking title is required".to_string(),
            ));
        }
        let db = &*self.db;
        let item = find_item(db, item_id).await?;
        record(
            db,
            &item,
            title.to_string(),
            notes.to_string(),
            user.map(str::to_owned),
            false,
        )
        .await
    }

    /// History of an item, oldest first.
    pub async fn tracking_info(
        &self,
        item_id: i32,
    ) -> Result<Vec<stock_item_tracking::Model>, ServiceError> {
        find_item(&*self.db, item_id).await?;
        Ok(TrackingEntity::find()
            .filter(stock_item_tracking::Column::ItemId.eq(item_id))
            .order_by_asc(stock_item_tracking::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn tracking_count(&self, item_id: i32) -> Result<u64, ServiceError> {
        Ok(TrackingEntity::find()
            .filter(stock_item_tracking::Column::ItemId.eq(item_id))
            .count(&*self.db)
            .await?)
    }

    pub async fn has_tracking_info(&self, item_id: i32) -> Result<bool, ServiceError> {
        Ok(self.tracking_count(item_id).await? > 0)
    }

    pub async fn latest_tracking(
        &self,
        item_id: i32,
    ) -> Result<Option<stock_item_tracking::Model>, ServiceError> {
        Ok(TrackingEntity::find()
            .filter(stock_item_tracking::Column::ItemId.eq(item_id))
            .order_by_desc(stock_item_tracking::Column::Id)
            .one(&*self.db)
            .await?)
    }
}

async fn find_location<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<stock_location::Model, ServiceError> {
    LocationEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Stock location", id))
}

async fn find_item<C: ConnectionTrait>(conn: &C, id: i32) -> Result<stock_item::Model, ServiceError> {
    StockItemEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Stock item", id))
}

pub(crate) async fn load_location_tree<C: ConnectionTrait>(
    conn: &C,
) -> Result<TreeIndex, ServiceError> {
    let locations = LocationEntity::find().all(conn).await?;
    Ok(TreeIndex::from_models(&locations))
}

async fn record<C: ConnectionTrait>(
    conn: &C,
    item: &stock_item::Model,
    title: String,
    notes: String,
    user: Option<String>,
    system: bool,
) -> Result<stock_item_tracking::Model, ServiceError> {
    let entry = stock_item_tracking::ActiveModel {
        item_id: Set(item.id),
        date: Set(Utc::now()),
        title: Set(title),
        notes: Set(notes),
        user: Set(user),
        system: Set(system),
        quantity: Set(item.quantity),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(entry)
}
