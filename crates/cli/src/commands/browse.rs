//! Read-only browsing: menu, item detail, categories and combo deals.

use clap::Args;

use bistro_client::combo::{ComboError, ComboGroup, ComboSelection};
use bistro_client::models::combo::ALL_CATEGORIES;
use bistro_client::models::{Combo, MenuItem, average_rating, combo_categories};
use bistro_core::{ComboId, MenuItemId, format_money};

use super::App;
use crate::error::CliError;
use crate::output;

#[derive(Args)]
pub struct MenuArgs {
    /// Only show this category
    #[arg(short, long)]
    category: Option<String>,

    /// Only show deals
    #[arg(long)]
    deals: bool,
}

#[derive(Args)]
pub struct CombosArgs {
    /// Only show this category (`All` shows everything)
    #[arg(short, long)]
    category: Option<String>,
}

/// Combo customization flags, shared by `combo-price` and `order`.
#[derive(Args, Debug, Default)]
pub struct ComboOptions {
    /// Sauce (ketchup, mayo, bbq, ranch, sriracha, garlic)
    #[arg(long)]
    sauce: Option<String>,

    /// Side (fries, onion_rings, coleslaw, salad, sweet_potato)
    #[arg(long)]
    side: Option<String>,

    /// Drink (coke, sprite, fanta, water, iced_tea)
    #[arg(long)]
    drink: Option<String>,

    /// Size (regular, large)
    #[arg(long)]
    size: Option<String>,

    /// Note for the kitchen
    #[arg(long)]
    note: Option<String>,
}

impl ComboOptions {
    /// Build the selection, defaulting every group that was not given.
    ///
    /// # Errors
    ///
    /// Returns `ComboError::UnknownOption` for a key the group lacks.
    pub fn selection(&self) -> Result<ComboSelection, ComboError> {
        let choices = [
            (ComboGroup::Sauce, &self.sauce),
            (ComboGroup::Side, &self.side),
            (ComboGroup::Drink, &self.drink),
            (ComboGroup::Size, &self.size),
        ];

        let mut selection = ComboSelection::default();
        for (group, key) in choices {
            if let Some(key) = key {
                selection = selection.with(group, key)?;
            }
        }
        Ok(match &self.note {
            Some(note) => selection.with_instructions(note),
            None => selection,
        })
    }
}

#[derive(Args)]
pub struct ComboPriceArgs {
    id: ComboId,

    #[command(flatten)]
    options: ComboOptions,
}

fn matches_category(item_category: &str, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| {
        wanted.eq_ignore_ascii_case(ALL_CATEGORIES) || item_category.eq_ignore_ascii_case(wanted)
    })
}

fn print_menu_item(item: &MenuItem) {
    let mut flags = Vec::new();
    if item.is_deal {
        flags.push("deal");
    }
    if !item.availability {
        flags.push("unavailable");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", flags.join(", "))
    };
    output::line(format_args!(
        "{:>4}  {:<28}{:>9}  {}{flags}",
        item.id,
        item.name,
        item.unit_price().display(),
        item.category
    ));
}

/// Print menu items, optionally filtered.
pub fn print_menu(items: &[MenuItem], category: Option<&str>, deals_only: bool) {
    let shown: Vec<_> = items
        .iter()
        .filter(|item| matches_category(&item.category, category))
        .filter(|item| !deals_only || item.is_deal)
        .collect();

    if shown.is_empty() {
        output::line("No items found.");
        return;
    }
    for item in shown {
        print_menu_item(item);
    }
}

pub async fn menu(app: &App, args: &MenuArgs) -> Result<(), CliError> {
    let items = app.api.menu().await?;
    output::heading("Menu");
    print_menu(&items, args.category.as_deref(), args.deals);
    Ok(())
}

pub async fn item(app: &App, id: MenuItemId) -> Result<(), CliError> {
    let item = app.api.menu_item(id).await?;
    let reviews = app.api.item_reviews(id).await?;

    output::heading(&item.name);
    output::line(format_args!("{}  ({})", item.unit_price(), item.category));
    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        output::line(description);
    }
    output::blank();

    match average_rating(&reviews) {
        Some(average) => output::line(format_args!(
            "Rated {average:.1}/5 from {} review(s)",
            reviews.len()
        )),
        None => output::line("No reviews yet."),
    }
    for review in &reviews {
        output::line(format_args!(
            "  {}/5  {}  {}",
            review.rating,
            review.user,
            review.comment.as_deref().unwrap_or("")
        ));
    }
    Ok(())
}

pub async fn categories(app: &App) -> Result<(), CliError> {
    let categories = app.api.categories().await?;
    output::heading("Categories");
    for category in categories {
        output::line(format_args!(
            "{:>4}  {:<20}{}",
            category.id,
            category.name,
            category.description.unwrap_or_default()
        ));
    }
    Ok(())
}

fn print_combo(combo: &Combo) {
    output::line(format_args!(
        "{:>4}  {:<28}{:>9}  save {}  [{}]",
        combo.id,
        combo.name,
        format_money(combo.combo_price),
        format_money(combo.savings()),
        combo.category_name()
    ));
    for item in &combo.items {
        output::line(format_args!("        {} x{}", item.name, item.quantity));
    }
}

pub async fn combos(app: &App, args: &CombosArgs) -> Result<(), CliError> {
    let combos = app.api.combos().await?;
    output::heading("Combo deals");
    output::line(format_args!(
        "Categories: {}",
        combo_categories(&combos).join(", ")
    ));
    output::blank();

    let wanted = args.category.as_deref();
    let mut shown = 0;
    for combo in combos
        .iter()
        .filter(|combo| matches_category(combo.category_name(), wanted))
    {
        print_combo(combo);
        shown += 1;
    }
    if shown == 0 {
        output::line("No combos found.");
    }
    Ok(())
}

/// Look up a combo by id in a listing.
pub fn find_combo(combos: &[Combo], id: ComboId) -> Result<&Combo, CliError> {
    combos
        .iter()
        .find(|combo| combo.id == id)
        .ok_or_else(|| CliError::NotFound(format!("Combo {id}")))
}

pub async fn combo_price(app: &App, args: &ComboPriceArgs) -> Result<(), CliError> {
    let combos = app.api.combos().await?;
    let combo = find_combo(&combos, args.id)?;
    let selection = args.options.selection()?;

    output::heading(&combo.name);
    output::money_row("Base price", combo.combo_price);
    for group in ComboGroup::ALL {
        let option = selection.get(group);
        output::money_row(&format!("  {group}: {}", option.name), option.surcharge);
    }
    output::money_row("Total", selection.total_price(combo.combo_price));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_category_filter() {
        assert!(matches_category("Burgers", None));
        assert!(matches_category("Burgers", Some("burgers")));
        assert!(matches_category("Burgers", Some("All")));
        assert!(!matches_category("Burgers", Some("Drinks")));
    }

    #[test]
    fn test_combo_options_default_and_override() {
        let defaults = ComboOptions::default().selection().unwrap();
        assert_eq!(defaults, ComboSelection::default());

        let options = ComboOptions {
            side: Some("onion_rings".to_string()),
            size: Some("large".to_string()),
            note: Some("extra napkins".to_string()),
            ..ComboOptions::default()
        };
        let selection = options.selection().unwrap();
        assert_eq!(selection.extra(), Decimal::new(450, 2));
        assert_eq!(
            selection.customizations().special_instructions.as_deref(),
            Some("extra napkins")
        );
    }

    #[test]
    fn test_combo_options_reject_unknown_key() {
        let options = ComboOptions {
            drink: Some("milkshake".to_string()),
            ..ComboOptions::default()
        };
        assert!(options.selection().is_err());
    }
}
