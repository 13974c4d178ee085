#![allow(dead_code)]

use std::sync::Arc;

use inventree::{
    config::AppConfig,
    db,
    entities::{part, part_category, stock_item, stock_location},
    services::{
        parts::{NewPart, NewPartCategory},
        stock::{NewStockItem, NewStockLocation},
        ServiceContainer,
    },
};

/// Services backed by a fresh in-memory SQLite database.
pub struct TestApp {
    pub services: ServiceContainer,
}

/// Rows seeded by [`TestApp::with_fixture`].
///
/// Locations: Home > {Bathroom, Dining Room}; Office > {Drawer_1, Drawer_2, Drawer_3}.
/// Stock: 4000 screws in the dining room, 5000 in the bathroom, two lots of
/// widgets (10 and 8) and 500 resistors in Drawer_3, 100 resistors in Drawer_1.
pub struct Fixture {
    pub home: stock_location::Model,
    pub bathroom: stock_location::Model,
    pub dining_room: stock_location::Model,
    pub office: stock_location::Model,
    pub drawer1: stock_location::Model,
    pub drawer2: stock_location::Model,
    pub drawer3: stock_location::Model,

    pub mechanical: part_category::Model,
    pub fasteners: part_category::Model,
    pub electronics: part_category::Model,
    pub resistors: part_category::Model,

    pub screw: part::Model,
    pub widget: part::Model,
    pub resistor: part::Model,

    pub screws_dining: stock_item::Model,
    pub screws_bathroom: stock_item::Model,
    pub widgets_a: stock_item::Model,
    pub widgets_b: stock_item::Model,
    pub resistors_drawer3: stock_item::Model,
    pub resistors_drawer1: stock_item::Model,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:".to_string(), "test".to_string());
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        Self {
            services: ServiceContainer::new(Arc::new(pool)),
        }
    }

    pub async fn with_fixture() -> (Self, Fixture) {
        let app = Self::new().await;
        let fixture = app.seed().await;
        (app, fixture)
    }

    pub async fn location(&self, name: &str, parent: Option<&stock_location::Model>) -> stock_location::Model {
        self.services
            .stock
            .create_location(NewStockLocation::new(name, parent.map(|p| p.id)))
            .await
            .expect("create location")
    }

    pub async fn category(&self, name: &str, parent: Option<&part_category::Model>) -> part_category::Model {
        self.services
            .parts
            .create_category(NewPartCategory::new(name, parent.map(|p| p.id)))
            .await
            .expect("create category")
    }

    pub async fn part(&self, input: NewPart) -> part::Model {
        self.services
            .parts
            .create_part(input)
            .await
            .expect("create part")
    }

    pub async fn stock(
        &self,
        part: &part::Model,
        location: &stock_location::Model,
        quantity: i32,
    ) -> stock_item::Model {
        self.services
            .stock
            .create_stock_item(NewStockItem::new(part.id, Some(location.id), quantity), None)
            .await
            .expect("create stock item")
            .item
    }

    async fn seed(&self) -> Fixture {
        let home = self.location("Home", None).await;
        let bathroom = self.location("Bathroom", Some(&home)).await;
        let dining_room = self.location("Dining Room", Some(&home)).await;
        let office = self.location("Office", None).await;
        let drawer1 = self.location("Drawer_1", Some(&office)).await;
        let drawer2 = self.location("Drawer_2", Some(&office)).await;
        let drawer3 = self.location("Drawer_3", Some(&office)).await;

        let mechanical = self.category("Mechanical", None).await;
        let fasteners = self.category("Fasteners", Some(&mechanical)).await;
        let electronics = self.category("Electronics", None).await;
        let resistors = self.category("Resistors", Some(&electronics)).await;

        let screw = self
            .part(NewPart {
                category_id: Some(fasteners.id),
                minimum_stock: 100,
                ..NewPart::new("M2x4 LPHS", "M2x4 low profile head screw")
            })
            .await;
        let widget = self
            .part(NewPart {
                ipn: Some("WID-001".to_string()),
                buildable: true,
                salable: true,
                ..NewPart::new("Widget", "A widget")
            })
            .await;
        let resistor = self
            .part(NewPart {
                category_id: Some(resistors.id),
                minimum_stock: 1000,
                ..NewPart::new("R_10K_0805", "10k resistor in 0805 package")
            })
            .await;

        let screws_dining = self.stock(&screw, &dining_room, 4000).await;
        let screws_bathroom = self.stock(&screw, &bathroom, 5000).await;
        let widgets_a = self.stock(&widget, &drawer3, 10).await;
        let widgets_b = self.stock(&widget, &drawer3, 8).await;
        let resistors_drawer3 = self.stock(&resistor, &drawer3, 500).await;
        let resistors_drawer1 = self.stock(&resistor, &drawer1, 100).await;

        Fixture {
            home,
            bathroom,
            dining_room,
            office,
            drawer1,
            drawer2,
            drawer3,
            mechanical,
            fasteners,
            electronics,
            resistors,
            screw,
            widget,
            resistor,
            screws_dining,
            screws_bathroom,
            widgets_a,
            widgets_b,
            resistors_drawer3,
            resistors_drawer1,
        }
    }
}
