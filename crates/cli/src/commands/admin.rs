//! Admin console commands.
//!
//! # Usage
//!
//! ```bash
//! bistro admin orders
//! bistro admin order-status 17 preparing
//! bistro admin menu-add --name "Veggie Burger" --price 9.50 --category Burgers --image burger.png
//! bistro admin category-toggle 3
//! bistro admin sales --period month
//! ```
//!
//! Every command checks the signed-in role first; the backend enforces it
//! again.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use bistro_client::forms::{CategoryForm, ImageUpload, MenuItemForm, MenuItemUpdate};
use bistro_client::models::{AdminOrder, DashboardStats, MessageResponse, SalesReport};
use bistro_core::{
    CategoryId, MenuItemId, OrderId, OrderStatus, ReservationId, ReservationStatus, SalesPeriod,
    UserId, UserRole, format_money,
};

use super::App;
use super::browse::print_menu;
use crate::error::CliError;
use crate::output;

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List every order with its next possible statuses
    Orders,
    /// Move an order to a new status
    OrderStatus { id: OrderId, status: OrderStatus },
    /// List reservations
    Reservations,
    /// Move a reservation to a new status
    ReservationStatus {
        id: ReservationId,
        status: ReservationStatus,
    },
    /// List users
    Users,
    /// Change a user's role
    UserRole { id: UserId, role: UserRole },
    /// List all categories, inactive ones included
    Categories,
    /// Create a category
    CategoryAdd(CategoryArgs),
    /// Replace a category's name, description and state
    CategoryUpdate {
        id: CategoryId,
        #[command(flatten)]
        category: CategoryArgs,
    },
    /// Activate or deactivate a category
    CategoryToggle { id: CategoryId },
    /// Delete a category (deactivated instead while items use it)
    CategoryDelete { id: CategoryId },
    /// List all menu items, unavailable ones included
    Menu,
    /// Create a menu item
    MenuAdd(MenuAddArgs),
    /// Change some fields of a menu item
    MenuUpdate(MenuUpdateArgs),
    /// Mark a menu item available or unavailable
    MenuToggle { id: MenuItemId },
    /// Delete a menu item
    MenuDelete { id: MenuItemId },
    /// Dashboard numbers
    Stats,
    /// Sales over time
    Sales {
        #[arg(short, long, default_value_t = SalesPeriod::Day)]
        period: SalesPeriod,
    },
}

#[derive(Args)]
pub struct CategoryArgs {
    #[arg(short, long)]
    name: String,

    #[arg(short, long)]
    description: Option<String>,

    /// Create or save the category as inactive
    #[arg(long)]
    inactive: bool,
}

impl CategoryArgs {
    fn into_form(self) -> CategoryForm {
        CategoryForm {
            name: self.name,
            description: self.description,
            is_active: !self.inactive,
        }
    }
}

#[derive(Args)]
pub struct MenuAddArgs {
    #[arg(short, long)]
    name: String,

    #[arg(short, long)]
    price: String,

    #[arg(short, long)]
    category: String,

    #[arg(short, long)]
    description: Option<String>,

    /// List the item as a deal
    #[arg(long)]
    deal: bool,

    /// Photo to upload (png, jpg, jpeg, gif or webp)
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args)]
pub struct MenuUpdateArgs {
    id: MenuItemId,

    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    price: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(long)]
    deal: Option<bool>,

    #[arg(long)]
    available: Option<bool>,

    #[arg(long)]
    image: Option<PathBuf>,
}

fn read_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>, CliError> {
    Ok(path.map(|path| ImageUpload::read(&path)).transpose()?)
}

fn done(response: &MessageResponse, fallback: &str) {
    output::line(response.message.as_deref().unwrap_or(fallback));
}

pub async fn run(app: &App, command: AdminCommand) -> Result<(), CliError> {
    app.require_admin()?;
    let api = &app.api;

    match command {
        AdminCommand::Orders => {
            let orders = api.admin_orders().await?;
            output::heading("Orders");
            for order in &orders {
                print_order(order);
            }
        }
        AdminCommand::OrderStatus { id, status } => {
            done(&api.update_order_status(id, status).await?, "Order updated");
        }
        AdminCommand::Reservations => {
            output::heading("Reservations");
            for reservation in api.admin_reservations().await? {
                output::line(format_args!(
                    "#{:<5} {}  {:<16} party of {:<3} {:<10} next: {}",
                    reservation.id,
                    reservation.time.format("%Y-%m-%d %H:%M"),
                    reservation.customer,
                    reservation.party_size,
                    reservation.status,
                    output::list(&reservation.status.next_actions())
                ));
                if let Some(requests) = reservation.requests.as_deref().filter(|r| !r.is_empty()) {
                    output::line(format_args!("        {requests}"));
                }
            }
        }
        AdminCommand::ReservationStatus { id, status } => {
            done(
                &api.update_reservation_status(id, status).await?,
                "Reservation updated",
            );
        }
        AdminCommand::Users => {
            output::heading("Users");
            for user in api.users().await? {
                output::line(format_args!(
                    "{:>4}  {:<20}{:<30}{}",
                    user.id,
                    user.username,
                    user.email.unwrap_or_default(),
                    user.role
                ));
            }
        }
        AdminCommand::UserRole { id, role } => {
            done(&api.update_user_role(id, role).await?, "User role updated");
        }
        AdminCommand::Categories => {
            output::heading("Categories");
            for category in api.admin_categories().await? {
                output::line(format_args!(
                    "{:>4}  {:<20}{:<10}{}",
                    category.id,
                    category.name,
                    if category.is_active { "active" } else { "inactive" },
                    category.description.unwrap_or_default()
                ));
            }
        }
        AdminCommand::CategoryAdd(args) => {
            let payload = args.into_form().validate()?;
            let created = api.create_category(&payload).await?;
            output::line(format_args!("Category #{} created", created.id));
        }
        AdminCommand::CategoryUpdate { id, category } => {
            let payload = category.into_form().validate()?;
            done(&api.update_category(id, &payload).await?, "Category updated");
        }
        AdminCommand::CategoryToggle { id } => {
            let categories = api.admin_categories().await?;
            let category = categories
                .iter()
                .find(|category| category.id == id)
                .ok_or_else(|| CliError::NotFound(format!("Category {id}")))?;
            done(
                &api.set_category_active(id, !category.is_active).await?,
                "Category updated",
            );
        }
        AdminCommand::CategoryDelete { id } => {
            done(&api.delete_category(id).await?, "Category deleted");
        }
        AdminCommand::Menu => {
            output::heading("Menu (all items)");
            print_menu(&api.menu_all().await?, None, false);
        }
        AdminCommand::MenuAdd(args) => {
            let fields = MenuItemForm {
                name: args.name,
                description: args.description,
                price: args.price,
                category: args.category,
                is_deal: args.deal,
                image: read_image(args.image)?,
            }
            .validate()?;
            let created = api.create_menu_item(fields).await?;
            output::line(format_args!("Menu item #{} created", created.id));
        }
        AdminCommand::MenuUpdate(args) => {
            let changes = MenuItemUpdate {
                name: args.name,
                description: args.description,
                price: args.price,
                category: args.category,
                is_deal: args.deal,
                availability: args.available,
                image: read_image(args.image)?,
            }
            .validate()?;
            done(
                &api.update_menu_item(args.id, changes).await?,
                "Menu item updated",
            );
        }
        AdminCommand::MenuToggle { id } => {
            let items = api.menu_all().await?;
            let item = items
                .iter()
                .find(|item| item.id == id)
                .ok_or_else(|| CliError::NotFound(format!("Menu item {id}")))?;
            done(
                &api.set_menu_item_availability(id, !item.availability).await?,
                "Menu item updated",
            );
        }
        AdminCommand::MenuDelete { id } => {
            done(&api.delete_menu_item(id).await?, "Menu item deleted");
        }
        AdminCommand::Stats => print_stats(&api.dashboard_stats().await?),
        AdminCommand::Sales { period } => print_sales(&api.sales_report(period).await?),
    }
    Ok(())
}

fn print_order(order: &AdminOrder) {
    output::line(format_args!(
        "#{:<5} {}  {:<16}{:<12}{:>10}  {} / {}  next: {}",
        order.id,
        order.date.format("%Y-%m-%d %H:%M"),
        order.customer,
        order.status.label(),
        format_money(order.total),
        order.fulfillment,
        order.payment,
        output::list(&order.next_actions())
    ));
    for line in &order.items {
        output::line(format_args!("        {} x{}", line.name, line.quantity));
    }
}

fn print_stats(stats: &DashboardStats) {
    output::heading("Dashboard");
    for (label, period) in [
        ("Today", &stats.today),
        ("This week", &stats.week),
        ("This month", &stats.month),
    ] {
        output::line(format_args!(
            "{label:<12}{:>12}  {} order(s)",
            format_money(period.sales),
            period.orders
        ));
    }
    output::line(format_args!(
        "{:<12}{:>12}  {} order(s)",
        "All time",
        format_money(stats.total.sales),
        stats.total.orders
    ));
    output::blank();
    output::line(format_args!(
        "Users: {}  Menu items: {}  Pending orders: {}",
        stats.total.users, stats.total.menu_items, stats.total.pending_orders
    ));
}

fn print_sales(report: &SalesReport) {
    output::heading(&format!("Sales by {}", report.period));
    for point in &report.data {
        output::line(format_args!(
            "{:<12}{:>12}  {} order(s)",
            point.label,
            format_money(point.sales),
            point.orders
        ));
    }
    output::blank();
    let summary = &report.summary;
    output::money_row("Total sales", summary.total_sales);
    output::money_row("Average sales", summary.average_sales);
    output::line(format_args!(
        "Orders: {} (avg {:.1})",
        summary.total_orders, summary.average_orders
    ));
    if let Some(best) = report.best() {
        output::line(format_args!(
            "Best: {} ({})",
            best.label,
            format_money(best.sales)
        ));
    }
}
