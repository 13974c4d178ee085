use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
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
        part_category::{self, Entity as CategoryEntity},
        stock_item::{self, Entity as StockItemEntity},
        stock_location::Entity as LocationEntity,
        supplier::{self, Entity as SupplierEntity},
        supplier_part::{self, Entity as SupplierPartEntity},
    },
    errors::ServiceError,
    tree::TreeIndex,
};

fn default_true() -> bool {
    true
}

fn default_one() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewPartCategory {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl NewPartCategory {
    pub fn new(name: impl Into<String>, parent_id: Option<i32>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parent_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPart {
    #[validate(length(min = 1, max = 100, message = "Part name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub ipn: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub default_location_id: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub units: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub minimum_stock: i32,
    #[serde(default)]
    pub trackable: bool,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default = "default_true")]
    pub consumable: bool,
    #[serde(default = "default_true")]
    pub purchaseable: bool,
    #[serde(default)]
    pub salable: bool,
    #[serde(default)]
    pub notes: String,
}

impl NewPart {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ipn: None,
            url: None,
            category_id: None,
            default_location_id: None,
            units: String::new(),
            minimum_stock: 0,
            trackable: false,
            buildable: false,
            consumable: true,
            purchaseable: true,
            salable: false,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBomItem {
    pub part_id: i32,
    pub sub_part_id: i32,
    #[serde(default = "default_one")]
    #[validate(range(min = 1, message = "BOM quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub note: String,
}

impl NewBomItem {
    pub fn new(part_id: i32, sub_part_id: i32, quantity: i32) -> Self {
        Self {
            part_id,
            sub_part_id,
            quantity,
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewSupplier {
    #[validate(length(min = 1, max = 100, message = "Supplier name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[serde(default)]
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSupplierPart {
    pub part_id: i32,
    pub supplier_id: i32,
    #[validate(length(min = 1, max = 100, message = "SKU is required"))]
    pub sku: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub mpn: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub single_price: Option<Decimal>,
    #[serde(default)]
    pub base_cost: Decimal,
    #[serde(default = "default_one")]
    #[validate(range(min = 1))]
    pub multiple: i32,
    #[serde(default = "default_one")]
    #[validate(range(min = 0))]
    pub minimum: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub lead_time_days: Option<i32>,
    #[serde(default)]
    pub packaging: Option<String>,
}

impl NewSupplierPart {
    pub fn new(part_id: i32, supplier_id: i32, sku: impl Into<String>) -> Self {
        Self {
            part_id,
            supplier_id,
            sku: sku.into(),
            manufacturer: None,
            mpn: None,
            url: None,
            description: String::new(),
            single_price: None,
            base_cost: Decimal::ZERO,
            multiple: 1,
            minimum: 1,
            lead_time_days: None,
            packaging: None,
        }
    }
}

/// Stock figures for one part.
#[derive(Debug, Clone, Serialize)]
pub struct PartStock {
    pub part: part::Model,
    pub total_stock: i64,
    pub allocation: i64,
    pub available_stock: i64,
    pub quantity_being_built: i64,
    pub under_minimum: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDeletion {
    pub category_id: i32,
    pub new_parent_id: Option<i32>,
    pub moved_parts: u64,
    pub moved_children: u64,
}

/// Quantity of a part tied up in active builds, given the BOM lines that use
/// it and the builds of the assemblies on those lines.
pub fn committed_quantity(used_in: &[bom_item::Model], builds: &[build::Model]) -> i64 {
    let per_assembly: HashMap<i32, i64> = used_in
        .iter()
        .map(|line| (line.part_id, i64::from(line.quantity)))
        .collect();

    builds
        .iter()
        .filter(|b| b.is_active())
        .filter_map(|b| per_assembly.get(&b.part_id).map(|q| q * i64::from(b.quantity)))
        .sum()
}

/// Part catalog: categories, parts, bills of materials and suppliers.
#[derive(Clone)]
pub struct PartService {
    db: Arc<DbPool>,
}

impl PartService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    // ----- categories -----

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        input: NewPartCategory,
    ) -> Result<part_category::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if let Some(parent_id) = input.parent_id {
            find_category(db, parent_id).await?;
        }

        let created = part_category::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            parent_id: Set(input.parent_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(category_id = created.id, name = %created.name, "Part category created");
        Ok(created)
    }

    pub async fn get_category(&self, id: i32) -> Result<part_category::Model, ServiceError> {
        find_category(&*self.db, id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<part_category::Model>, ServiceError> {
        Ok(CategoryEntity::find()
            .order_by_asc(part_category::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn category_tree(&self) -> Result<TreeIndex, ServiceError> {
        load_category_tree(&*self.db).await
    }

    pub async fn category_pathstring(&self, id: i32) -> Result<String, ServiceError> {
        Ok(self.category_tree().await?.pathstring(id)?)
    }

    #[instrument(skip(self))]
    pub async fn move_category(
        &self,
        id: i32,
        parent_id: Option<i32>,
    ) -> Result<part_category::Model, ServiceError> {
        db::transaction(&self.db, "parts.move_category", move |txn| {
            Box::pin(async move {
                load_category_tree(txn).await?.set_parent(id, parent_id)?;

                let category = find_category(txn, id).await?;
                let mut active: part_category::ActiveModel = category.into();
                active.parent_id = Set(parent_id);
                let updated = active.update(txn).await?;

                info!(category_id = id, ?parent_id, "Part category moved");
                Ok(updated)
            })
        })
        .await
    }

    /// Number of parts in this category and all of its subcategories.
    pub async fn partcount(&self, id: i32) -> Result<u64, ServiceError> {
        let ids = self.category_tree().await?.unique_children(id)?;
        Ok(PartEntity::find()
            .filter(part::Column::CategoryId.is_in(ids))
            .count(&*self.db)
            .await?)
    }

    /// Deletes a category, moving its parts and subcategories up to its parent.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> Result<CategoryDeletion, ServiceError> {
        db::transaction(&self.db, "parts.delete_category", move |txn| {
            Box::pin(async move {
                let new_parent_id = load_category_tree(txn).await?.remove(id)?;

                let moved_parts = PartEntity::update_many()
                    .col_expr(part::Column::CategoryId, Expr::value(new_parent_id))
                    .filter(part::Column::CategoryId.eq(id))
                    .exec(txn)
                    .await?
                    .rows_affected;

                let moved_children = CategoryEntity::update_many()
                    .col_expr(part_category::Column::ParentId, Expr::value(new_parent_id))
                    .filter(part_category::Column::ParentId.eq(id))
                    .exec(txn)
                    .await?
                    .rows_affected;

                CategoryEntity::delete_by_id(id).exec(txn).await?;

                info!(category_id = id, ?new_parent_id, moved_parts, moved_children, "Part category deleted");
                Ok(CategoryDeletion {
                    category_id: id,
                    new_parent_id,
                    moved_parts,
                    moved_children,
                })
            })
        })
        .await
    }

    // ----- parts -----

    #[instrument(skip(self), fields(name = %input.name))]
    pub async fn create_part(&self, input: NewPart) -> Result<part::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if let Some(category_id) = input.category_id {
            find_category(db, category_id).await?;
        }
        if let Some(location_id) = input.default_location_id {
            LocationEntity::find_by_id(location_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Stock location", location_id))?;
        }

        let created = part::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            ipn: Set(input.ipn),
            url: Set(input.url),
            category_id: Set(input.category_id),
            default_location_id: Set(input.default_location_id),
            units: Set(input.units),
            minimum_stock: Set(input.minimum_stock),
            trackable: Set(input.trackable),
            buildable: Set(input.buildable),
            consumable: Set(input.consumable),
            purchaseable: Set(input.purchaseable),
            salable: Set(input.salable),
            notes: Set(input.notes),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(part_id = created.id, "Part created");
        Ok(created)
    }

    pub async fn get_part(&self, id: i32) -> Result<part::Model, ServiceError> {
        find_part(&*self.db, id).await
    }

    /// All parts, or the parts directly in `category_id`.
    pub async fn list_parts(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<part::Model>, ServiceError> {
        let mut query = PartEntity::find().order_by_asc(part::Column::Id);
        if let Some(category_id) = category_id {
            query = query.filter(part::Column::CategoryId.eq(category_id));
        }
        Ok(query.all(&*self.db).await?)
    }

    pub async fn set_category(
        &self,
        part_id: i32,
        category_id: Option<i32>,
    ) -> Result<part::Model, ServiceError> {
        let db = &*self.db;
        let part = find_part(db, part_id).await?;
        if let Some(category_id) = category_id {
            find_category(db, category_id).await?;
        }

        let mut active: part::ActiveModel = part.into();
        active.category_id = Set(category_id);
        Ok(active.update(db).await?)
    }

    /// Deletes a part along with its stock, BOM lines and builds.
    #[instrument(skip(self))]
    pub async fn delete_part(&self, id: i32) -> Result<(), ServiceError> {
        let result = PartEntity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Part", id));
        }
        info!(part_id = id, "Part deleted");
        Ok(())
    }

    pub async fn total_stock(&self, part_id: i32) -> Result<i64, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        total_stock(db, part_id).await
    }

    pub async fn allocation(&self, part_id: i32) -> Result<i64, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        allocation(db, part_id).await
    }

    /// Stock left after allocations. Negative when builds need more than is held.
    pub async fn available_stock(&self, part_id: i32) -> Result<i64, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        Ok(total_stock(db, part_id).await? - allocation(db, part_id).await?)
    }

    pub async fn quantity_being_built(&self, part_id: i32) -> Result<i64, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        quantity_being_built(db, part_id).await
    }

    pub async fn is_under_minimum(&self, part_id: i32) -> Result<bool, ServiceError> {
        let db = &*self.db;
        let part = find_part(db, part_id).await?;
        Ok(total_stock(db, part_id).await? < i64::from(part.minimum_stock))
    }

    pub async fn stock_summary(&self, part_id: i32) -> Result<PartStock, ServiceError> {
        let db = &*self.db;
        let part = find_part(db, part_id).await?;
        summarize(db, part).await
    }

    /// Stock figures for every part, ordered by id.
    pub async fn stock_report(&self) -> Result<Vec<PartStock>, ServiceError> {
        let db = &*self.db;
        let parts = PartEntity::find()
            .order_by_asc(part::Column::Id)
            .all(db)
            .await?;

        let mut report = Vec::with_capacity(parts.len());
        for part in parts {
            report.push(summarize(db, part).await?);
        }
        Ok(report)
    }

    // ----- bill of materials -----

    #[instrument(skip(self))]
    pub async fn add_bom_item(&self, input: NewBomItem) -> Result<bom_item::Model, ServiceError> {
        input.validate()?;

        if input.part_id == input.sub_part_id {
            return Err(ServiceError::ValidationError(
                "A part cannot be added to its own bill of materials".to_string(),
            ));
        }

        db::transaction(&self.db, "parts.add_bom_item", move |txn| {
            Box::pin(async move {
                let assembly = find_part(txn, input.part_id).await?;
                let component = find_part(txn, input.sub_part_id).await?;

                if !assembly.buildable {
                    return Err(ServiceError::ValidationError(format!(
                        "Part '{}' is not buildable",
                        assembly.name
                    )));
                }
                if !component.consumable {
                    return Err(ServiceError::ValidationError(format!(
                        "Part '{}' is not consumable",
                        component.name
                    )));
                }

                let existing = BomItemEntity::find()
                    .filter(bom_item::Column::PartId.eq(assembly.id))
                    .filter(bom_item::Column::SubPartId.eq(component.id))
                    .count(txn)
                    .await?;
                if existing > 0 {
                    return Err(ServiceError::Conflict(format!(
                        "'{}' is already in the bill of materials for '{}'",
                        component.name, assembly.name
                    )));
                }

                let created = bom_item::ActiveModel {
                    part_id: Set(assembly.id),
                    sub_part_id: Set(component.id),
                    quantity: Set(input.quantity),
                    note: Set(input.note),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                info!(bom_item_id = created.id, part_id = assembly.id, sub_part_id = component.id, "BOM item added");
                Ok(created)
            })
        })
        .await
    }

    pub async fn set_bom_quantity(
        &self,
        bom_item_id: i32,
        quantity: i32,
    ) -> Result<bom_item::Model, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::ValidationError(
                "BOM quantity must be at least 1".to_string(),
            ));
        }
        let db = &*self.db;
        let line = BomItemEntity::find_by_id(bom_item_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("BOM item", bom_item_id))?;

        let mut active: bom_item::ActiveModel = line.into();
        active.quantity = Set(quantity);
        Ok(active.update(db).await?)
    }

    pub async fn remove_bom_item(&self, bom_item_id: i32) -> Result<(), ServiceError> {
        let result = BomItemEntity::delete_by_id(bom_item_id)
            .exec(&*self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("BOM item", bom_item_id));
        }
        Ok(())
    }

    /// Lines of the bill of materials for an assembly.
    pub async fn bom_items(&self, part_id: i32) -> Result<Vec<bom_item::Model>, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        Ok(BomItemEntity::find()
            .filter(bom_item::Column::PartId.eq(part_id))
            .order_by_asc(bom_item::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn list_bom_items(&self) -> Result<Vec<bom_item::Model>, ServiceError> {
        Ok(BomItemEntity::find()
            .order_by_asc(bom_item::Column::PartId)
            .order_by_asc(bom_item::Column::Id)
            .all(&*self.db)
            .await?)
    }

    /// BOM lines, across all assemblies, that consume this part.
    pub async fn used_in(&self, part_id: i32) -> Result<Vec<bom_item::Model>, ServiceError> {
        let db = &*self.db;
        find_part(db, part_id).await?;
        used_in(db, part_id).await
    }

    pub async fn bom_count(&self, part_id: i32) -> Result<u64, ServiceError> {
        Ok(BomItemEntity::find()
            .filter(bom_item::Column::PartId.eq(part_id))
            .count(&*self.db)
            .await?)
    }

    pub async fn used_in_count(&self, part_id: i32) -> Result<u64, ServiceError> {
        Ok(BomItemEntity::find()
            .filter(bom_item::Column::SubPartId.eq(part_id))
            .count(&*self.db)
            .await?)
    }

    // ----- suppliers -----

    #[instrument(skip(self), fields(name = %input.name))]
    pub async fn create_supplier(&self, input: NewSupplier) -> Result<supplier::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        let taken = SupplierEntity::find()
            .filter(supplier::Column::Name.eq(input.name.as_str()))
            .count(db)
            .await?;
        if taken > 0 {
            return Err(ServiceError::Conflict(format!(
                "Supplier '{}' already exists",
                input.name
            )));
        }

        let created = supplier::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            website: Set(input.website),
            email: Set(input.email),
            phone: Set(input.phone),
            notes: Set(input.notes),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(supplier_id = created.id, "Supplier created");
        Ok(created)
    }

    pub async fn get_supplier(&self, id: i32) -> Result<supplier::Model, ServiceError> {
        SupplierEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supplier", id))
    }

    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        Ok(SupplierEntity::find()
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self), fields(sku = %input.sku))]
    pub async fn create_supplier_part(
        &self,
        input: NewSupplierPart,
    ) -> Result<supplier_part::Model, ServiceError> {
        input.validate()?;
        if input.base_cost < Decimal::ZERO || input.single_price.map_or(false, |p| p < Decimal::ZERO) {
            return Err(ServiceError::ValidationError(
                "Prices cannot be negative".to_string(),
            ));
        }

        db::transaction(&self.db, "parts.create_supplier_part", move |txn| {
            Box::pin(async move {
                let part = find_part(txn, input.part_id).await?;
                if !part.purchaseable {
                    return Err(ServiceError::ValidationError(format!(
                        "Part '{}' is not purchaseable",
                        part.name
                    )));
                }

                SupplierEntity::find_by_id(input.supplier_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Supplier", input.supplier_id))?;

                let duplicate = SupplierPartEntity::find()
                    .filter(supplier_part::Column::PartId.eq(input.part_id))
                    .filter(supplier_part::Column::SupplierId.eq(input.supplier_id))
                    .filter(supplier_part::Column::Sku.eq(input.sku.as_str()))
                    .count(txn)
                    .await?;
                if duplicate > 0 {
                    return Err(ServiceError::Conflict(format!(
                        "SKU '{}' is already registered for this part and supplier",
                        input.sku
                    )));
                }

                let created = supplier_part::ActiveModel {
                    part_id: Set(input.part_id),
                    supplier_id: Set(input.supplier_id),
                    sku: Set(input.sku),
                    manufacturer: Set(input.manufacturer),
                    mpn: Set(input.mpn),
                    url: Set(input.url),
                    description: Set(input.description),
                    single_price: Set(input.single_price),
                    base_cost: Set(input.base_cost),
                    multiple: Set(input.multiple),
                    minimum: Set(input.minimum),
                    lead_time_days: Set(input.lead_time_days),
                    packaging: Set(input.packaging),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                info!(supplier_part_id = created.id, "Supplier part created");
                Ok(created)
            })
        })
        .await
    }

    pub async fn supplier_parts(
        &self,
        part_id: i32,
    ) -> Result<Vec<supplier_part::Model>, ServiceError> {
        Ok(SupplierPartEntity::find()
            .filter(supplier_part::Column::PartId.eq(part_id))
            .order_by_asc(supplier_part::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn list_supplier_parts(&self) -> Result<Vec<supplier_part::Model>, ServiceError> {
        Ok(SupplierPartEntity::find()
            .order_by_asc(supplier_part::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn price_for(
        &self,
        supplier_part_id: i32,
        quantity: i32,
    ) -> Result<Option<Decimal>, ServiceError> {
        let supplier_part = SupplierPartEntity::find_by_id(supplier_part_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supplier part", supplier_part_id))?;
        Ok(supplier_part.price_for(quantity))
    }

    /// Lowest total price for `quantity` units across all suppliers of a part.
    pub async fn cheapest_price(
        &self,
        part_id: i32,
        quantity: i32,
    ) -> Result<Option<Decimal>, ServiceError> {
        Ok(self
            .supplier_parts(part_id)
            .await?
            .iter()
            .filter_map(|sp| sp.price_for(quantity))
            .min())
    }
}

pub(crate) async fn find_part<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<part::Model, ServiceError> {
    PartEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Part", id))
}

async fn find_category<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<part_category::Model, ServiceError> {
    CategoryEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Part category", id))
}

async fn load_category_tree<C: ConnectionTrait>(conn: &C) -> Result<TreeIndex, ServiceError> {
    let categories = CategoryEntity::find().all(conn).await?;
    Ok(TreeIndex::from_models(&categories))
}

async fn used_in<C: ConnectionTrait>(
    conn: &C,
    part_id: i32,
) -> Result<Vec<bom_item::Model>, ServiceError> {
    Ok(BomItemEntity::find()
        .filter(bom_item::Column::SubPartId.eq(part_id))
        .order_by_asc(bom_item::Column::Id)
        .all(conn)
        .await?)
}

pub(crate) async fn total_stock<C: ConnectionTrait>(conn: &C, part_id: i32) -> Result<i64, ServiceError> {
    let quantities: Vec<i32> = StockItemEntity::find()
        .select_only()
        .column(stock_item::Column::Quantity)
        .filter(stock_item::Column::PartId.eq(part_id))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(quantities.into_iter().map(i64::from).sum())
}

async fn allocation<C: ConnectionTrait>(conn: &C, part_id: i32) -> Result<i64, ServiceError> {
    let lines = used_in(conn, part_id).await?;
    if lines.is_empty() {
        return Ok(0);
    }

    let assemblies: Vec<i32> = lines.iter().map(|l| l.part_id).collect();
    let builds = BuildEntity::find()
        .filter(build::Column::PartId.is_in(assemblies))
        .filter(build::Column::Status.is_in(BuildStatus::active()))
        .all(conn)
        .await?;

    Ok(committed_quantity(&lines, &builds))
}

async fn quantity_being_built<C: ConnectionTrait>(
    conn: &C,
    part_id: i32,
) -> Result<i64, ServiceError> {
    let quantities: Vec<i32> = BuildEntity::find()
        .select_only()
        .column(build::Column::Quantity)
        .filter(build::Column::PartId.eq(part_id))
        .filter(build::Column::Status.is_in(BuildStatus::active()))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(quantities.into_iter().map(i64::from).sum())
}

async fn summarize<C: ConnectionTrait>(conn: &C, part: part::Model) -> Result<PartStock, ServiceError> {
    let total_stock = total_stock(conn, part.id).await?;
    let allocation = allocation(conn, part.id).await?;
    let quantity_being_built = quantity_being_built(conn, part.id).await?;

    Ok(PartStock {
        total_stock,
        allocation,
        available_stock: total_stock - allocation,
        quantity_being_built,
        under_minimum: total_stock < i64::from(part.minimum_stock),
        part,
    })
}
