mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use common::{Fixture, TestApp};
use inventree::{
    entities::build::BuildStatus,
    errors::ServiceError,
    services::{builds::NewBuild, parts::NewBomItem},
};

async fn widget_bom(app: &TestApp, fx: &Fixture) {
    let parts = &app.services.parts;
    parts
        .add_bom_item(NewBomItem::new(fx.widget.id, fx.screw.id, 4))
        .await
        .unwrap();
    parts
        .add_bom_item(NewBomItem::new(fx.widget.id, fx.resistor.id, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn new_build_is_pending() {
    let (app, fx) = TestApp::with_fixture().await;

    let build = app
        .services
        .builds
        .create_build(NewBuild::new(fx.widget.id, "Widget batch", 5))
        .await
        .unwrap();

    assert_eq!(build.status, BuildStatus::Pending);
    assert!(build.is_active());
    assert_eq!(build.creation_date, Utc::now().date_naive());
    assert_eq!(build.completion_date, None);
    assert_eq!(build.absolute_url(), format!("/build/{}/", build.id));
}

#[tokio::test]
async fn build_input_is_validated() {
    let (app, fx) = TestApp::with_fixture().await;
    let builds = &app.services.builds;

    assert_matches!(
        builds.create_build(NewBuild::new(fx.widget.id, "", 1)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        builds.create_build(NewBuild::new(fx.widget.id, "Zero", 0)).await,
        Err(ServiceError::ValidationError(_))
    );
    // screws are not buildable
    assert_matches!(
        builds.create_build(NewBuild::new(fx.screw.id, "Screws", 1)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        builds.create_build(NewBuild::new(999, "Ghost", 1)).await,
        Err(ServiceError::NotFound(_))
    );
    assert!(builds.list_builds(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn hold_resume_complete() {
    let (app, fx) = TestApp::with_fixture().await;
    let builds = &app.services.builds;

    let build = builds
        .create_build(NewBuild::new(fx.widget.id, "Widget batch", 5))
        .await
        .unwrap();

    assert_eq!(builds.hold(build.id).await.unwrap().status, BuildStatus::Holding);
    assert_eq!(builds.resume(build.id).await.unwrap().status, BuildStatus::Pending);

    let done = builds.complete(build.id).await.unwrap();
    assert_eq!(done.status, BuildStatus::Complete);
    assert_eq!(done.completion_date, Some(Utc::now().date_naive()));
    assert!(!done.is_active());
}

#[tokio::test]
async fn finished_builds_are_frozen() {
    let (app, fx) = TestApp::with_fixture().await;
    let builds = &app.services.builds;

    let done = builds
        .create_build(NewBuild::new(fx.widget.id, "Done", 1))
        .await
        .unwrap();
    builds.complete(done.id).await.unwrap();

    let dropped = builds
        .create_build(NewBuild::new(fx.widget.id, "Dropped", 1))
        .await
        .unwrap();
    builds.cancel(dropped.id).await.unwrap();

    assert_matches!(builds.cancel(done.id).await, Err(ServiceError::InvalidStatus(_)));
    assert_matches!(builds.resume(done.id).await, Err(ServiceError::InvalidStatus(_)));
    assert_matches!(builds.complete(dropped.id).await, Err(ServiceError::InvalidStatus(_)));
    assert_matches!(builds.resume(dropped.id).await, Err(ServiceError::InvalidStatus(_)));

    let reloaded = builds.get_build(dropped.id).await.unwrap();
    assert_eq!(reloaded.status, BuildStatus::Cancelled);
    assert_eq!(reloaded.completion_date, None);
}

#[tokio::test]
async fn pending_build_cannot_resume() {
    let (app, fx) = TestApp::with_fixture().await;
    let builds = &app.services.builds;

    let build = builds
        .create_build(NewBuild::new(fx.widget.id, "Batch", 1))
        .await
        .unwrap();
    assert_matches!(builds.resume(build.id).await, Err(ServiceError::InvalidStatus(_)));
    assert_matches!(builds.hold(999).await, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn required_parts_scale_with_quantity() {
    let (app, fx) = TestApp::with_fixture().await;
    widget_bom(&app, &fx).await;

    let build = app
        .services
        .builds
        .create_build(NewBuild::new(fx.widget.id, "Widget batch", 25))
        .await
        .unwrap();

    let required = app.services.builds.required_parts(build.id).await.unwrap();
    let lines: Vec<(&str, i32, i64)> = required
        .iter()
        .map(|r| (r.part.name.as_str(), r.per_unit, r.quantity))
        .collect();
    assert_eq!(lines, vec![("M2x4 LPHS", 4, 100), ("R_10K_0805", 2, 50)]);
}

#[tokio::test]
async fn list_filters_by_status() {
    let (app, fx) = TestApp::with_fixture().await;
    let builds = &app.services.builds;

    let a = builds
        .create_build(NewBuild::new(fx.widget.id, "A", 1))
        .await
        .unwrap();
    let b = builds
        .create_build(NewBuild::new(fx.widget.id, "B", 2))
        .await
        .unwrap();
    builds.hold(b.id).await.unwrap();
    let c = builds
        .create_build(NewBuild::new(fx.widget.id, "C", 3))
        .await
        .unwrap();
    builds.cancel(c.id).await.unwrap();

    let all = builds.list_builds(None).await.unwrap();
    assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![c.id, b.id, a.id]);

    let held = builds.list_builds(Some(BuildStatus::Holding)).await.unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].id, b.id);

    let active = builds.active_builds(fx.widget.id).await.unwrap();
    assert_eq!(active.iter().map(|b| b.id).collect::<Vec<_>>(), vec![a.id, b.id]);
}
