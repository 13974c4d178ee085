use std::{str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use inventree::{
    admin::{AdminModel, AdminRegistry},
    config::{self, AppConfig},
    db,
    entities::{build::BuildStatus, stock_item},
    services::{
        stock::{StockFilter, TrackedChange},
        ServiceContainer,
    },
};
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize(cli.user).await?;

    match cli.command {
        Commands::Migrate => {
            db::run_migrations(context.services.db_pool()).await?;
            println!("Migrations applied");
        }
        Commands::Locations(command) => handle_locations(&context, command, cli.json).await?,
        Commands::Stock(command) => handle_stock(&context, command, cli.json).await?,
        Commands::Parts(command) => handle_parts(&context, command, cli.json).await?,
        Commands::Builds(command) => handle_builds(&context, command, cli.json).await?,
        Commands::Admin(command) => handle_admin(&context, command, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "inventree", about = "Inventory, stock and build management", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[arg(long, global = true, help = "User recorded on stock tracking entries")]
    user: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    #[command(subcommand)]
    Locations(LocationCommands),
    #[command(subcommand)]
    Stock(StockCommands),
    #[command(subcommand)]
    Parts(PartCommands),
    #[command(subcommand)]
    Builds(BuildCommands),
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum LocationCommands {
    /// Print the location tree with item counts
    Tree,
    /// Show one location
    Show { id: i32 },
}

#[derive(Subcommand)]
enum StockCommands {
    /// List stock items
    List(StockListArgs),
    /// Move an item to another location
    Move(MoveArgs),
    /// Record a physical count
    Stocktake(QuantityArgs),
    /// Add stock to an item
    Add(QuantityArgs),
    /// Remove stock from an item
    Take(QuantityArgs),
    /// Show an item's tracking history
    History { item: i32 },
}

#[derive(Args)]
struct StockListArgs {
    #[arg(long, help = "Only items of this part")]
    part: Option<i32>,
    #[arg(long, help = "Only items in this location")]
    location: Option<i32>,
    #[arg(long, action = ArgAction::SetTrue, help = "Include sublocations of --location")]
    recursive: bool,
}

#[derive(Args)]
struct MoveArgs {
    item: i32,
    location: i32,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Args)]
struct QuantityArgs {
    item: i32,
    quantity: i32,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Subcommand)]
enum PartCommands {
    /// Stock summary for every part
    List,
    /// Stock summary and BOM for one part
    Show { id: i32 },
}

#[derive(Subcommand)]
enum BuildCommands {
    /// List builds
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Components a build needs
    Parts { id: i32 },
    Hold { id: i32 },
    Resume { id: i32 },
    Complete { id: i32 },
    Cancel { id: i32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Holding,
    Cancelled,
    Complete,
}

impl From<StatusArg> for BuildStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => BuildStatus::Pending,
            StatusArg::Holding => BuildStatus::Holding,
            StatusArg::Cancelled => BuildStatus::Cancelled,
            StatusArg::Complete => BuildStatus::Complete,
        }
    }
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Registered models and their list columns
    Models,
    /// Render a model's list view
    List {
        #[arg(value_parser = parse_model)]
        model: AdminModel,
    },
    /// Export a model's list view as JSON
    Export {
        #[arg(value_parser = parse_model)]
        model: AdminModel,
    },
}

fn parse_model(value: &str) -> Result<AdminModel, String> {
    AdminModel::from_str(value).map_err(|_| format!("unknown model '{}'", value))
}

struct CliContext {
    services: ServiceContainer,
    admin: AdminRegistry,
    user: Option<String>,
}

impl CliContext {
    async fn initialize(user: Option<String>) -> Result<Self> {
        let config: AppConfig = config::load_config().context("failed to load application config")?;
        config::init_tracing(config.log_level(), config.log_json);

        let db_pool = db::establish_connection_from_app_config(&config)
            .await
            .context("failed to connect to database")?;
        if config.auto_migrate {
            db::run_migrations(&db_pool).await?;
        }

        Ok(Self {
            services: ServiceContainer::new(Arc::new(db_pool)),
            admin: AdminRegistry::default_site(),
            user: user.or(config.operator),
        })
    }

    fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

async fn handle_locations(context: &CliContext, command: LocationCommands, json: bool) -> Result<()> {
    let stock = &context.services.stock;

    match command {
        LocationCommands::Tree => {
            let tree = stock.location_tree().await?;
            let mut details = Vec::with_capacity(tree.len());
            for (_, id) in tree.walk() {
                details.push(stock.location_detail(id).await?);
            }

            if json {
                print_json(&details)?;
            } else {
                for detail in &details {
                    println!(
                        "{}{} (#{}, {} items)",
                        "  ".repeat(detail.depth),
                        detail.location.name,
                        detail.location.id,
                        detail.item_count
                    );
                }
            }
        }
        LocationCommands::Show { id } => {
            let detail = stock.location_detail(id).await?;
            if json {
                print_json(&detail)?;
            } else {
                println!("{} ({})", detail.pathstring, detail.location.absolute_url());
                if !detail.location.description.is_empty() {
                    println!("  {}", detail.location.description);
                }
                println!("  items (incl. sublocations): {}", detail.item_count);
                for item in stock.stock_items(id).await? {
                    println!("  - {}", stock.stock_item_label(item.id).await?);
                }
            }
        }
    }

    Ok(())
}

async fn handle_stock(context: &CliContext, command: StockCommands, json: bool) -> Result<()> {
    let stock = &context.services.stock;

    match command {
        StockCommands::List(args) => {
            let items = stock
                .list_stock_items(StockFilter {
                    part_id: args.part,
                    location_id: args.location,
                    include_sublocations: args.recursive,
                })
                .await?;

            if json {
                print_json(&items)?;
            } else {
                for item in &items {
                    render_item(context, item).await?;
                }
            }
        }
        StockCommands::Move(args) => {
            let change = stock
                .move_item(args.item, args.location, &args.notes, context.user())
                .await?;
            render_change(&change, json)?;
        }
        StockCommands::Stocktake(args) => {
            let change = stock
                .stocktake(args.item, args.quantity, context.user(), &args.notes)
                .await?;
            render_change(&change, json)?;
        }
        StockCommands::Add(args) => {
            let change = stock
                .add_stock(args.item, args.quantity, context.user(), &args.notes)
                .await?;
            render_change(&change, json)?;
        }
        StockCommands::Take(args) => {
            let change = stock
                .take_stock(args.item, args.quantity, context.user(), &args.notes)
                .await?;
            render_change(&change, json)?;
        }
        StockCommands::History { item } => {
            let entries = stock.tracking_info(item).await?;
            if json {
                print_json(&entries)?;
            } else {
                for entry in &entries {
                    println!(
                        "{} {} (qty {}){}",
                        entry.date.format("%Y-%m-%d %H:%M"),
                        entry.title,
                        entry.quantity,
                        entry
                            .user
                            .as_deref()
                            .map(|u| format!(" by {}", u))
                            .unwrap_or_default()
                    );
                    if !entry.notes.is_empty() {
                        println!("    {}", entry.notes);
                    }
                }
            }
        }
    }

    Ok(())
}

async fn handle_parts(context: &CliContext, command: PartCommands, json: bool) -> Result<()> {
    let parts = &context.services.parts;

    match command {
        PartCommands::List => {
            let report = parts.stock_report().await?;
            if json {
                print_json(&report)?;
            } else {
                for row in &report {
                    println!(
                        "#{} {} | stock {} | allocated {} | available {} | building {}{}",
                        row.part.id,
                        row.part,
                        row.total_stock,
                        row.allocation,
                        row.available_stock,
                        row.quantity_being_built,
                        if row.under_minimum { " | below minimum" } else { "" }
                    );
                }
            }
        }
        PartCommands::Show { id } => {
            let summary = parts.stock_summary(id).await?;
            let bom = parts.bom_items(id).await?;
            if json {
                print_json(&serde_json::json!({ "stock": summary, "bom": bom }))?;
            } else {
                println!("{} ({})", summary.part, summary.part.absolute_url());
                println!(
                    "  stock {} | allocated {} | available {}",
                    summary.total_stock, summary.allocation, summary.available_stock
                );
                for line in &bom {
                    let sub_part = parts.get_part(line.sub_part_id).await?;
                    println!("  - {} x {}", line.quantity, sub_part.name);
                }
            }
        }
    }

    Ok(())
}

async fn handle_builds(context: &CliContext, command: BuildCommands, json: bool) -> Result<()> {
    let builds = &context.services.builds;

    let updated = match command {
        BuildCommands::List { status } => {
            let list = builds.list_builds(status.map(BuildStatus::from)).await?;
            if json {
                print_json(&list)?;
            } else {
                for build in &list {
                    println!(
                        "#{} {} | part {} | qty {} | {}",
                        build.id, build.title, build.part_id, build.quantity, build.status
                    );
                }
            }
            return Ok(());
        }
        BuildCommands::Parts { id } => {
            let required = builds.required_parts(id).await?;
            if json {
                print_json(&required)?;
            } else {
                for line in &required {
                    println!("{} x {} ({} per unit)", line.quantity, line.part.name, line.per_unit);
                }
            }
            return Ok(());
        }
        BuildCommands::Hold { id } => builds.hold(id).await?,
        BuildCommands::Resume { id } => builds.resume(id).await?,
        BuildCommands::Complete { id } => builds.complete(id).await?,
        BuildCommands::Cancel { id } => builds.cancel(id).await?,
    };

    if json {
        print_json(&updated)?;
    } else {
        println!("Build #{} is now {}", updated.id, updated.status);
    }
    Ok(())
}

async fn handle_admin(context: &CliContext, command: AdminCommands, json: bool) -> Result<()> {
    let admin = &context.admin;

    match command {
        AdminCommands::Models => {
            for model in admin.models() {
                if let Some(registration) = admin.get(model) {
                    println!("{}: {}", model, registration.list_display.join(", "));
                }
            }
        }
        AdminCommands::List { model } => {
            let view = admin.changelist(&context.services, model).await?;
            if json {
                print_json(&view)?;
            } else {
                println!("{}", view.render_table());
            }
        }
        AdminCommands::Export { model } => {
            println!("{}", admin.export_json(&context.services, model).await?);
        }
    }

    Ok(())
}

async fn render_item(context: &CliContext, item: &stock_item::Model) -> Result<()> {
    let label = context.services.stock.stock_item_label(item.id).await?;
    println!("#{} {} [{}]", item.id, label, item.status);
    Ok(())
}

fn render_change(change: &TrackedChange, json: bool) -> Result<()> {
    if json {
        return print_json(change);
    }
    println!(
        "Stock item #{}: {} (quantity now {})",
        change.item.id, change.entry.title, change.item.quantity
    );
    if !change.entry.notes.is_empty() {
        println!("  notes: {}", change.entry.notes);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
