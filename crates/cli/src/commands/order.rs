//! Ordering: build a cart from flags, check out, and order history.

use std::str::FromStr;

use clap::Args;

use bistro_client::checkout::PriceBreakdown;
use bistro_client::models::MenuItem;
use bistro_client::{Cart, Checkout, Coupon};
use bistro_core::{ComboId, FulfillmentType, MenuItemId, PaymentMethod, format_money};

use super::App;
use super::browse::{ComboOptions, find_combo};
use crate::error::CliError;
use crate::output;

/// `--item 4` or `--item 4x2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: MenuItemId,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid item '{s}' (expected ID or IDxQTY)");
        let (id, quantity) = match s.trim().split_once(['x', 'X']) {
            Some((id, quantity)) => (id, quantity.parse::<u32>().map_err(|_| invalid())?),
            None => (s.trim(), 1),
        };
        if quantity == 0 {
            return Err(invalid());
        }
        Ok(Self {
            id: id.parse().map_err(|_| invalid())?,
            quantity,
        })
    }
}

#[derive(Args)]
pub struct OrderArgs {
    /// Menu item to add, optionally with a quantity (repeatable)
    #[arg(long = "item", value_name = "ID[xQTY]")]
    items: Vec<ItemSpec>,

    /// Combo whose items are added individually (repeatable)
    #[arg(long = "combo", value_name = "ID")]
    combos: Vec<ComboId>,

    /// Combo added as one customized line (repeatable)
    #[arg(long = "custom-combo", value_name = "ID")]
    custom_combos: Vec<ComboId>,

    #[command(flatten)]
    options: ComboOptions,

    /// Coupon code
    #[arg(long)]
    coupon: Option<String>,

    /// Payment method (`cash` or `card`)
    #[arg(long, default_value_t = PaymentMethod::Cash)]
    payment: PaymentMethod,

    /// Fulfillment (`delivery` or `pickup`)
    #[arg(long = "type", default_value_t = FulfillmentType::Delivery)]
    fulfillment: FulfillmentType,

    /// Price the order without placing it
    #[arg(long)]
    dry_run: bool,
}

fn find_item(menu: &[MenuItem], id: MenuItemId) -> Result<&MenuItem, CliError> {
    menu.iter()
        .find(|item| item.id == id)
        .ok_or_else(|| CliError::NotFound(format!("Menu item {id}")))
}

async fn build_cart(app: &App, args: &OrderArgs) -> Result<Cart, CliError> {
    let mut cart = Cart::new();

    if !args.items.is_empty() {
        let menu = app.api.menu().await?;
        for spec in &args.items {
            let item = find_item(&menu, spec.id)?;
            for _ in 0..spec.quantity {
                cart.add_item(item);
            }
        }
    }

    if !args.combos.is_empty() || !args.custom_combos.is_empty() {
        let combos = app.api.combos().await?;
        for id in &args.combos {
            cart.add_combo_items(find_combo(&combos, *id)?);
        }
        let selection = args.options.selection()?;
        for id in &args.custom_combos {
            cart.add_customized_combo(find_combo(&combos, *id)?, &selection);
        }
    }

    Ok(cart)
}

fn print_cart(cart: &Cart) {
    output::heading("Cart");
    if cart.is_empty() {
        output::line("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        output::line(format_args!(
            "{:>3} x {:<28}{:>10}",
            line.quantity(),
            line.name(),
            format_money(line.line_total())
        ));
        if let Some(custom) = line.customizations() {
            output::line(format_args!("        {custom}"));
        }
    }
    output::blank();
}

fn print_breakdown(breakdown: &PriceBreakdown, coupon: Option<&Coupon>) {
    output::money_row("Subtotal", breakdown.subtotal);
    if let Some(coupon) = coupon {
        output::money_row(
            &format!("Discount ({}, {} off)", coupon.code, coupon.discount),
            breakdown.discount,
        );
    }
    output::money_row("Total", breakdown.total);
}

pub async fn place(app: &App, args: OrderArgs) -> Result<(), CliError> {
    let mut cart = build_cart(app, &args).await?;

    let mut checkout = Checkout::new(args.fulfillment, args.payment);
    if let Some(code) = &args.coupon {
        checkout.apply_coupon(&app.api, code).await?;
    }

    print_cart(&cart);
    print_breakdown(&checkout.breakdown(&cart), checkout.applied_coupon());
    output::line(format_args!(
        "{} / {}",
        checkout.fulfillment, checkout.payment
    ));

    if args.dry_run {
        return Ok(());
    }

    let order_id = checkout
        .place_order(&mut cart, &app.api, app.api.session())
        .await?;
    output::blank();
    output::line(format_args!(
        "Order #{order_id} placed. Track it with `bistro orders`."
    ));
    Ok(())
}

pub async fn history(app: &App) -> Result<(), CliError> {
    app.require_login()?;
    let orders = app.api.orders().await?;

    output::heading("Your orders");
    if orders.is_empty() {
        output::line("No orders yet.");
        return Ok(());
    }
    for order in orders {
        output::line(format_args!(
            "#{:<5} {}  {:<12}{:>10}  ({} item(s))",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.status.label(),
            format_money(order.total),
            order.unit_count()
        ));
        for line in &order.items {
            output::line(format_args!("        {} x{}", line.name, line.quantity));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_spec() {
        assert_eq!(
            "4".parse::<ItemSpec>().unwrap(),
            ItemSpec {
                id: MenuItemId::new(4),
                quantity: 1
            }
        );
        assert_eq!(
            "12x3".parse::<ItemSpec>().unwrap(),
            ItemSpec {
                id: MenuItemId::new(12),
                quantity: 3
            }
        );
        assert!("4x0".parse::<ItemSpec>().is_err());
        assert!("x2".parse::<ItemSpec>().is_err());
        assert!("burger".parse::<ItemSpec>().is_err());
    }
}
