mod common;

use assert_matches::assert_matches;
use common::TestApp;
use inventree::{errors::ServiceError, services::stock::NewStockLocation};

#[tokio::test]
async fn location_count() {
    let (app, _fx) = TestApp::with_fixture().await;
    assert_eq!(app.services.stock.list_locations().await.unwrap().len(), 7);
}

#[tokio::test]
async fn location_urls() {
    let (_app, fx) = TestApp::with_fixture().await;
    assert_eq!(fx.home.absolute_url(), format!("/stock/location/{}/", fx.home.id));
    assert_eq!(fx.home.absolute_url(), "/stock/location/1/");
}

#[tokio::test]
async fn parent_locations_and_pathstring() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    assert_eq!(fx.office.parent_id, None);
    assert_eq!(fx.drawer1.parent_id, Some(fx.office.id));
    assert_eq!(fx.drawer2.parent_id, Some(fx.office.id));
    assert_eq!(fx.drawer3.parent_id, Some(fx.office.id));

    assert_eq!(stock.pathstring(fx.drawer3.id).await.unwrap(), "Office/Drawer_3");

    let moved = stock.move_location(fx.drawer3.id, Some(fx.home.id)).await.unwrap();
    assert_ne!(moved.parent_id, Some(fx.office.id));
    assert_eq!(stock.pathstring(fx.drawer3.id).await.unwrap(), "Home/Drawer_3");

    let parents = stock.parent_locations(fx.drawer3.id).await.unwrap();
    assert_eq!(parents.iter().map(|l| l.id).collect::<Vec<_>>(), vec![fx.home.id]);
}

#[tokio::test]
async fn nested_pathstring_lists_every_ancestor() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    let tray = app.location("Tray", Some(&fx.drawer1)).await;
    assert_eq!(stock.pathstring(tray.id).await.unwrap(), "Office/Drawer_1/Tray");

    let parents = stock.parent_locations(tray.id).await.unwrap();
    let names: Vec<&str> = parents.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Office", "Drawer_1"]);
}

#[tokio::test]
async fn children() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    assert!(stock.has_children(fx.office.id).await.unwrap());
    assert!(!stock.has_children(fx.drawer2.id).await.unwrap());

    let childs = stock.unique_children(fx.office.id).await.unwrap();
    assert!(childs.contains(&fx.drawer1.id));
    assert!(childs.contains(&fx.drawer2.id));
    assert!(!childs.contains(&fx.bathroom.id));

    let direct = stock.child_locations(fx.home.id).await.unwrap();
    assert_eq!(
        direct.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
        vec!["Bathroom", "Dining Room"]
    );
}

#[tokio::test]
async fn items() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    assert!(stock.has_items(fx.drawer1.id).await.unwrap());
    assert!(stock.has_items(fx.drawer3.id).await.unwrap());
    assert!(!stock.has_items(fx.drawer2.id).await.unwrap());

    assert_eq!(stock.stock_items(fx.drawer3.id).await.unwrap().len(), 3);
    assert_eq!(stock.item_count(fx.office.id).await.unwrap(), 4);
    assert_eq!(stock.item_count(fx.home.id).await.unwrap(), 2);
}

#[tokio::test]
async fn delete_location_moves_stock_to_parent() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    let n_stock = stock.count_stock_items().await.unwrap();
    let stock_ids: Vec<i32> = stock
        .stock_items(fx.drawer3.id)
        .await
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect();

    let deletion = stock.delete_location(fx.drawer3.id).await.unwrap();
    assert_eq!(deletion.new_parent_id, Some(fx.office.id));
    assert_eq!(deletion.moved_items, 3);

    assert_eq!(stock.count_stock_items().await.unwrap(), n_stock);
    for id in stock_ids {
        let item = stock.get_stock_item(id).await.unwrap();
        assert_eq!(item.location_id, Some(fx.office.id));
    }
    assert_matches!(
        stock.get_location(fx.drawer3.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn delete_location_hands_sublocations_to_parent() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    let deletion = stock.delete_location(fx.office.id).await.unwrap();
    assert_eq!(deletion.new_parent_id, None);
    assert_eq!(deletion.moved_children, 3);

    let drawer1 = stock.get_location(fx.drawer1.id).await.unwrap();
    assert_eq!(drawer1.parent_id, None);
    assert_eq!(stock.pathstring(fx.drawer1.id).await.unwrap(), "Drawer_1");
    assert_eq!(stock.list_locations().await.unwrap().len(), 6);
}

#[tokio::test]
async fn delete_root_location_leaves_items_without_location() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    let first = app.stock(&fx.screw, &fx.home, 250).await;
    let second = app.stock(&fx.resistor, &fx.home, 40).await;
    let n_stock = stock.count_stock_items().await.unwrap();

    let deletion = stock.delete_location(fx.home.id).await.unwrap();
    assert_eq!(deletion.new_parent_id, None);
    assert_eq!(deletion.moved_items, 2);
    assert_eq!(deletion.moved_children, 2);

    assert_eq!(stock.count_stock_items().await.unwrap(), n_stock);
    for item in [&first, &second] {
        let reloaded = stock.get_stock_item(item.id).await.unwrap();
        assert_eq!(reloaded.location_id, None);
        assert_eq!(reloaded.quantity, item.quantity);
    }
    assert_eq!(
        stock.stock_item_label(first.id).await.unwrap(),
        "250 x M2x4 LPHS"
    );
    assert!(!stock
        .stock_item_label(second.id)
        .await
        .unwrap()
        .contains(" @ "));

    let bathroom = stock.get_location(fx.bathroom.id).await.unwrap();
    assert_eq!(bathroom.parent_id, None);
    let dining = stock.stock_items(fx.dining_room.id).await.unwrap();
    assert_eq!(dining.len(), 1);
}

#[tokio::test]
async fn delete_unknown_location_changes_nothing() {
    let (app, _fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;
    let n_stock = stock.count_stock_items().await.unwrap();

    assert_matches!(stock.delete_location(999).await, Err(ServiceError::NotFound(_)));
    assert_eq!(stock.list_locations().await.unwrap().len(), 7);
    assert_eq!(stock.count_stock_items().await.unwrap(), n_stock);
}

#[tokio::test]
async fn location_cannot_move_into_its_own_subtree() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    assert_matches!(
        stock.move_location(fx.office.id, Some(fx.drawer1.id)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        stock.move_location(fx.office.id, Some(fx.office.id)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        stock.move_location(fx.office.id, Some(999)).await,
        Err(ServiceError::NotFound(_))
    );

    // Nothing changed
    assert_eq!(stock.get_location(fx.office.id).await.unwrap().parent_id, None);
}

#[tokio::test]
async fn location_requires_name_and_existing_parent() {
    let app = TestApp::new().await;
    let stock = &app.services.stock;

    assert_matches!(
        stock.create_location(NewStockLocation::new("", None)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        stock.create_location(NewStockLocation::new("Shelf", Some(42))).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn tree_walk_is_depth_first() {
    let (app, _fx) = TestApp::with_fixture().await;
    let tree = app.services.stock.location_tree().await.unwrap();

    let names: Vec<String> = tree
        .walk()
        .into_iter()
        .map(|(depth, id)| format!("{}{}", "-".repeat(depth), tree.get(id).unwrap().name))
        .collect();
    assert_eq!(
        names,
        vec!["Home", "-Bathroom", "-Dining Room", "Office", "-Drawer_1", "-Drawer_2", "-Drawer_3"]
    );
}

#[tokio::test]
async fn location_detail_summarizes_subtree() {
    let (app, fx) = TestApp::with_fixture().await;
    let detail = app.services.stock.location_detail(fx.drawer3.id).await.unwrap();

    assert_eq!(detail.pathstring, "Office/Drawer_3");
    assert_eq!(detail.depth, 1);
    assert!(!detail.has_children);
    assert_eq!(detail.item_count, 3);
}

#[tokio::test]
async fn rename_keeps_subtree_paths_current() {
    let (app, fx) = TestApp::with_fixture().await;
    let stock = &app.services.stock;

    let renamed = stock
        .rename_location(fx.office.id, "Workshop".to_string(), Some("Ground floor".to_string()))
        .await
        .unwrap();
    assert_eq!(renamed.description, "Ground floor");
    assert_eq!(stock.pathstring(fx.drawer3.id).await.unwrap(), "Workshop/Drawer_3");

    assert_matches!(
        stock.rename_location(fx.office.id, String::new(), None).await,
        Err(ServiceError::ValidationError(_))
    );
}
