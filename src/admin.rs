//! Admin registry: list views over the catalog, stock and build tables.
//!
//! Each registered model declares the columns its list view shows. Views
//! render every cell as a string; models registered with import/export can
//! also be exported as JSON records.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::{
    entities::{part, supplier},
    errors::ServiceError,
    services::{stock::StockFilter, ServiceContainer},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminModel {
    Part,
    PartCategory,
    BomItem,
    SupplierPart,
    StockLocation,
    StockItem,
    Build,
}

/// Registration of one model with the admin site.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub model: AdminModel,
    pub list_display: &'static [&'static str],
    /// Whether the list view can be exported
    pub import_export: bool,
}

impl ModelAdmin {
    pub const fn new(model: AdminModel, list_display: &'static [&'static str]) -> Self {
        Self {
            model,
            list_display,
            import_export: false,
        }
    }

    pub fn with_import_export(mut self) -> Self {
        self.import_export = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub model: AdminModel,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ListView {
    /// Plain text table with columns padded to their widest cell.
    pub fn render_table(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(&self.columns)];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    registry: BTreeMap<AdminModel, ModelAdmin>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every model and its standard columns.
    pub fn default_site() -> Self {
        let mut site = Self::new();
        for admin in [
            ModelAdmin::new(
                AdminModel::Part,
                &["name", "IPN", "description", "total_stock", "category"],
            )
            .with_import_export(),
            ModelAdmin::new(AdminModel::PartCategory, &["name", "pathstring", "description"]),
            ModelAdmin::new(AdminModel::BomItem, &["part", "sub_part", "quantity"])
                .with_import_export(),
            ModelAdmin::new(AdminModel::SupplierPart, &["part", "supplier", "SKU"])
                .with_import_export(),
            ModelAdmin::new(AdminModel::StockLocation, &["name", "pathstring", "description"]),
            ModelAdmin::new(AdminModel::StockItem, &["part", "quantity", "location", "status"]),
            ModelAdmin::new(AdminModel::Build, &["title", "part", "quantity", "status"]),
        ] {
            // A fresh registry cannot hold duplicates.
            site.registry.insert(admin.model, admin);
        }
        site
    }

    pub fn register(&mut self, admin: ModelAdmin) -> Result<(), ServiceError> {
        if self.registry.contains_key(&admin.model) {
            return Err(ServiceError::Conflict(format!(
                "Model {} is already registered",
                admin.model
            )));
        }
        self.registry.insert(admin.model, admin);
        Ok(())
    }

    pub fn unregister(&mut self, model: AdminModel) -> Option<ModelAdmin> {
        self.registry.remove(&model)
    }

    pub fn get(&self, model: AdminModel) -> Option<&ModelAdmin> {
        self.registry.get(&model)
    }

    pub fn is_registered(&self, model: AdminModel) -> bool {
        self.registry.contains_key(&model)
    }

    pub fn models(&self) -> Vec<AdminModel> {
        AdminModel::iter().filter(|m| self.is_registered(*m)).collect()
    }

    fn admin(&self, model: AdminModel) -> Result<&ModelAdmin, ServiceError> {
        self.get(model).ok_or_else(|| {
            ServiceError::NotFound(format!("Model {} is not registered", model))
        })
    }

    /// Builds the list view of a registered model from the current database rows.
    pub async fn changelist(
        &self,
        services: &ServiceContainer,
        model: AdminModel,
    ) -> Result<ListView, ServiceError> {
        let admin = self.admin(model)?;
        let records = load_records(services, model).await?;
        debug!(%model, rows = records.len(), "Rendering admin list view");

        let rows = records
            .iter()
            .map(|record| {
                admin
                    .list_display
                    .iter()
                    .map(|column| {
                        record.get(*column).cloned().ok_or_else(|| {
                            ServiceError::InvalidOperation(format!(
                                "Unknown column '{}' for {}",
                                column, model
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListView {
            model,
            columns: admin.list_display.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Exports a list view as a JSON array. Only import/export models qualify.
    pub async fn export_json(
        &self,
        services: &ServiceContainer,
        model: AdminModel,
    ) -> Result<String, ServiceError> {
        if !self.admin(model)?.import_export {
            return Err(ServiceError::InvalidOperation(format!(
                "Model {} does not support export",
                model
            )));
        }
        let view = self.changelist(services, model).await?;
        Ok(serde_json::to_string_pretty(&view.to_records())?)
    }
}

type Record = HashMap<&'static str, String>;

fn record<const N: usize>(cells: [(&'static str, String); N]) -> Record {
    cells.into_iter().collect()
}

fn part_names(parts: &[part::Model]) -> HashMap<i32, String> {
    parts.iter().map(|p| (p.id, p.to_string())).collect()
}

fn lookup(names: &HashMap<i32, String>, id: Option<i32>) -> String {
    id.and_then(|id| names.get(&id).cloned()).unwrap_or_default()
}

async fn load_records(
    services: &ServiceContainer,
    model: AdminModel,
) -> Result<Vec<Record>, ServiceError> {
    let parts_svc = &services.parts;
    let stock_svc = &services.stock;

    let records = match model {
        AdminModel::Part => {
            let categories: HashMap<i32, String> = parts_svc
                .list_categories()
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();
            parts_svc
                .stock_report()
                .await?
                .into_iter()
                .map(|summary| {
                    let p = summary.part;
                    record([
                        ("name", p.name),
                        ("IPN", p.ipn.unwrap_or_default()),
                        ("description", p.description),
                        ("total_stock", summary.total_stock.to_string()),
                        ("category", lookup(&categories, p.category_id)),
                    ])
                })
                .collect()
        }
        AdminModel::PartCategory => {
            let tree = parts_svc.category_tree().await?;
            parts_svc
                .list_categories()
                .await?
                .into_iter()
                .map(|c| {
                    Ok(record([
                        ("pathstring", tree.pathstring(c.id)?),
                        ("name", c.name),
                        ("description", c.description),
                    ]))
                })
                .collect::<Result<Vec<_>, ServiceError>>()?
        }
        AdminModel::BomItem => {
            let names = part_names(&parts_svc.list_parts(None).await?);
            parts_svc
                .list_bom_items()
                .await?
                .into_iter()
                .map(|line| {
                    record([
                        ("part", lookup(&names, Some(line.part_id))),
                        ("sub_part", lookup(&names, Some(line.sub_part_id))),
                        ("quantity", line.quantity.to_string()),
                    ])
                })
                .collect()
        }
        AdminModel::SupplierPart => {
            let names = part_names(&parts_svc.list_parts(None).await?);
            let suppliers: HashMap<i32, String> = parts_svc
                .list_suppliers()
                .await?
                .into_iter()
                .map(|s: supplier::Model| (s.id, s.name))
                .collect();
            parts_svc
                .list_supplier_parts()
                .await?
                .into_iter()
                .map(|sp| {
                    record([
                        ("part", lookup(&names, Some(sp.part_id))),
                        ("supplier", lookup(&suppliers, Some(sp.supplier_id))),
                        ("SKU", sp.sku),
                    ])
                })
                .collect()
        }
        AdminModel::StockLocation => {
            let tree = stock_svc.location_tree().await?;
            stock_svc
                .list_locations()
                .await?
                .into_iter()
                .map(|loc| {
                    Ok(record([
                        ("pathstring", tree.pathstring(loc.id)?),
                        ("name", loc.name),
                        ("description", loc.description),
                    ]))
                })
                .collect::<Result<Vec<_>, ServiceError>>()?
        }
        AdminModel::StockItem => {
            let names = part_names(&parts_svc.list_parts(None).await?);
            let locations: HashMap<i32, String> = stock_svc
                .list_locations()
                .await?
                .into_iter()
                .map(|l| (l.id, l.name))
                .collect();
            stock_svc
                .list_stock_items(StockFilter::default())
                .await?
                .into_iter()
                .map(|item| {
                    record([
                        ("part", lookup(&names, Some(item.part_id))),
                        ("quantity", item.quantity.to_string()),
                        ("location", lookup(&locations, item.location_id)),
                        ("status", item.status.to_string()),
                    ])
                })
                .collect()
        }
        AdminModel::Build => {
            let names = part_names(&parts_svc.list_parts(None).await?);
            let mut builds = services.builds.list_builds(None).await?;
            builds.sort_by_key(|b| b.id);
            builds
                .into_iter()
                .map(|b| {
                    record([
                        ("title", b.title),
                        ("part", lookup(&names, Some(b.part_id))),
                        ("quantity", b.quantity.to_string()),
                        ("status", b.status.to_string()),
                    ])
                })
                .collect()
        }
    };

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(AdminModel::Part, &["name", "IPN", "description", "total_stock", "category"])]
    #[case(AdminModel::PartCategory, &["name", "pathstring", "description"])]
    #[case(AdminModel::BomItem, &["part", "sub_part", "quantity"])]
    #[case(AdminModel::SupplierPart, &["part", "supplier", "SKU"])]
    #[case(AdminModel::StockItem, &["part", "quantity", "location", "status"])]
    fn default_site_columns(#[case] model: AdminModel, #[case] columns: &[&str]) {
        let site = AdminRegistry::default_site();
        assert_eq!(site.get(model).unwrap().list_display, columns);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut site = AdminRegistry::default_site();
        let again = ModelAdmin::new(AdminModel::Part, &["name"]);
        assert_matches!(site.register(again), Err(ServiceError::Conflict(_)));

        site.unregister(AdminModel::Part);
        assert!(site.register(ModelAdmin::new(AdminModel::Part, &["name"])).is_ok());
    }

    #[test]
    fn model_names_parse_from_snake_case() {
        assert_eq!(AdminModel::from_str("bom_item").unwrap(), AdminModel::BomItem);
        assert_eq!(AdminModel::StockLocation.to_string(), "stock_location");
        assert!(AdminModel::from_str("order").is_err());
    }

    #[test]
    fn table_pads_columns() {
        let view = ListView {
            model: AdminModel::BomItem,
            columns: vec!["part".into(), "quantity".into()],
            rows: vec![vec!["Widget - A widget".into(), "4".into()]],
        };
        let table = view.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "part              | quantity");
        assert_eq!(lines[2], "Widget - A widget | 4");
    }

    #[test]
    fn records_are_keyed_by_column() {
        let view = ListView {
            model: AdminModel::SupplierPart,
            columns: vec!["part".into(), "SKU".into()],
            rows: vec![vec!["Resistor - 10k".into(), "R-10K".into()]],
        };
        assert_eq!(
            view.to_records(),
            vec![serde_json::json!({"part": "Resistor - 10k", "SKU": "R-10K"})]
        );
    }
}
