mod common;

use assert_matches::assert_matches;
use common::TestApp;
use inventree::{
    admin::{AdminModel, AdminRegistry},
    errors::ServiceError,
    services::{
        builds::NewBuild,
        parts::{NewBomItem, NewSupplier, NewSupplierPart},
    },
};
use serde_json::Value;

#[tokio::test]
async fn part_list_view() {
    let (app, _fx) = TestApp::with_fixture().await;
    let site = AdminRegistry::default_site();

    let view = site.changelist(&app.services, AdminModel::Part).await.unwrap();
    assert_eq!(view.columns, vec!["name", "IPN", "description", "total_stock", "category"]);
    assert_eq!(
        view.rows,
        vec![
            vec!["M2x4 LPHS", "", "M2x4 low profile head screw", "9000", "Fasteners"],
            vec!["Widget", "WID-001", "A widget", "18", ""],
            vec!["R_10K_0805", "", "10k resistor in 0805 package", "600", "Resistors"],
        ]
    );
}

#[tokio::test]
async fn tree_views_show_pathstring() {
    let (app, _fx) = TestApp::with_fixture().await;
    let site = AdminRegistry::default_site();

    let locations = site
        .changelist(&app.services, AdminModel::StockLocation)
        .await
        .unwrap();
    let paths: Vec<&str> = locations.rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "Home",
            "Home/Bathroom",
            "Home/Dining Room",
            "Office",
            "Office/Drawer_1",
            "Office/Drawer_2",
            "Office/Drawer_3",
        ]
    );

    let categories = site
        .changelist(&app.services, AdminModel::PartCategory)
        .await
        .unwrap();
    assert_eq!(categories.rows[3], vec!["Resistors", "Electronics/Resistors", ""]);
}

#[tokio::test]
async fn stock_and_build_views() {
    let (app, fx) = TestApp::with_fixture().await;
    let site = AdminRegistry::default_site();

    let items = site
        .changelist(&app.services, AdminModel::StockItem)
        .await
        .unwrap();
    assert_eq!(items.rows.len(), 6);
    assert_eq!(
        items.rows[0],
        vec!["M2x4 LPHS - M2x4 low profile head screw", "4000", "Dining Room", "OK"]
    );

    app.services
        .builds
        .create_build(NewBuild::new(fx.widget.id, "Widget batch", 5))
        .await
        .unwrap();
    let builds = site.changelist(&app.services, AdminModel::Build).await.unwrap();
    assert_eq!(
        builds.rows,
        vec![vec!["Widget batch", "Widget - A widget", "5", "Pending"]]
    );
}

#[tokio::test]
async fn bom_export_is_json_records() {
    let (app, fx) = TestApp::with_fixture().await;
    app.services
        .parts
        .add_bom_item(NewBomItem::new(fx.widget.id, fx.screw.id, 4))
        .await
        .unwrap();

    let site = AdminRegistry::default_site();
    let exported = site
        .export_json(&app.services, AdminModel::BomItem)
        .await
        .unwrap();

    let records: Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(
        records,
        serde_json::json!([{
            "part": "Widget - A widget",
            "sub_part": "M2x4 LPHS - M2x4 low profile head screw",
            "quantity": "4",
        }])
    );
}

#[tokio::test]
async fn supplier_part_view() {
    let (app, fx) = TestApp::with_fixture().await;
    let parts = &app.services.parts;
    let supplier = parts
        .create_supplier(NewSupplier {
            name: "DigiKey".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    parts
        .create_supplier_part(NewSupplierPart::new(fx.resistor.id, supplier.id, "RMCF0805"))
        .await
        .unwrap();

    let view = AdminRegistry::default_site()
        .changelist(&app.services, AdminModel::SupplierPart)
        .await
        .unwrap();
    assert_eq!(
        view.rows,
        vec![vec!["R_10K_0805 - 10k resistor in 0805 package", "DigiKey", "RMCF0805"]]
    );
}

#[tokio::test]
async fn export_requires_import_export_registration() {
    let (app, _fx) = TestApp::with_fixture().await;
    let mut site = AdminRegistry::default_site();

    assert_matches!(
        site.export_json(&app.services, AdminModel::StockLocation).await,
        Err(ServiceError::InvalidOperation(_))
    );

    site.unregister(AdminModel::Part);
    assert_matches!(
        site.changelist(&app.services, AdminModel::Part).await,
        Err(ServiceError::NotFound(_))
    );
    assert!(!site.models().contains(&AdminModel::Part));
}
