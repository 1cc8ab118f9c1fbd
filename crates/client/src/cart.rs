//! In-memory shopping cart.
//!
//! The list of lines is the only state. Subtotal and item count are
//! computed from it on every call, so they can never go stale after a
//! mutation.
//!
//! Lines come in two shapes:
//!
//! - [`PlainLine`]: a single menu item. Adding the same item again bumps
//!   its quantity.
//! - [`ComboLine`]: one customized combo, carrying its option choices and
//!   the items it bundles. Every customized add creates a new line.
//!
//! Quantities never drop below 1 through [`Cart::update_quantity`] or
//! [`Cart::decrement`]; [`Cart::remove_item`] is the only way to delete a
//! line.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::debug;
use uuid::Uuid;

use bistro_core::{ComboId, MenuItemId};

use crate::combo::{ComboSelection, Customizations};
use crate::models::{Combo, ComboItem, MenuItem};

/// Identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineId {
    Item(MenuItemId),
    Combo { combo_id: ComboId, instance: Uuid },
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "{id}"),
            Self::Combo { combo_id, instance } => write!(f, "combo-{combo_id}-{instance}"),
        }
    }
}

/// Items go out as their numeric id, combos as `"combo-<id>-<instance>"`,
/// which is the shape the order endpoint parses.
impl Serialize for LineId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Item(id) => id.serialize(serializer),
            Self::Combo { .. } => serializer.collect_str(self),
        }
    }
}

/// What gets added as a plain line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: MenuItemId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_url: Option<String>,
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            image_url: item.image_url.clone(),
        }
    }
}

impl From<&ComboItem> for CartItem {
    fn from(item: &ComboItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            image_url: item.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainLine {
    pub item: CartItem,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboLine {
    pub combo_id: ComboId,
    /// Distinguishes two customizations of the same combo.
    pub instance: Uuid,
    pub name: String,
    /// Base combo price plus customization surcharges.
    pub unit_price: Decimal,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub customizations: Customizations,
    pub constituent_items: Vec<ComboItem>,
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLine {
    Plain(PlainLine),
    Combo(ComboLine),
}

impl CartLine {
    #[must_use]
    pub const fn id(&self) -> LineId {
        match self {
            Self::Plain(line) => LineId::Item(line.item.id),
            Self::Combo(line) => LineId::Combo {
                combo_id: line.combo_id,
                instance: line.instance,
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(line) => &line.item.name,
            Self::Combo(line) => &line.name,
        }
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        match self {
            Self::Plain(line) => line.item.unit_price,
            Self::Combo(line) => line.unit_price,
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        match self {
            Self::Plain(line) => line.quantity,
            Self::Combo(line) => line.quantity,
        }
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Plain(line) => line.item.image_url.as_deref(),
            Self::Combo(line) => line.image_url.as_deref(),
        }
    }

    /// Option choices, for combo lines.
    #[must_use]
    pub const fn customizations(&self) -> Option<&Customizations> {
        match self {
            Self::Plain(_) => None,
            Self::Combo(line) => Some(&line.customizations),
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity())
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        match self {
            Self::Plain(line) => &mut line.quantity,
            Self::Combo(line) => &mut line.quantity,
        }
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`, merging with an existing line for it.
    pub fn add_item(&mut self, item: impl Into<CartItem>) -> LineId {
        let item = item.into();
        let id = LineId::Item(item.id);

        if let Some(line) = self.find_mut(&id) {
            *line.quantity_mut() += 1;
            debug!(line_id = %id, quantity = line.quantity(), "Cart line incremented");
        } else {
            debug!(line_id = %id, "Cart line added");
            self.lines.push(CartLine::Plain(PlainLine { item, quantity: 1 }));
        }
        id
    }

    /// Append a composite combo line as-is (quantity below 1 becomes 1).
    pub fn add_combo(&mut self, mut line: ComboLine) -> LineId {
        line.quantity = line.quantity.max(1);
        let id = LineId::Combo {
            combo_id: line.combo_id,
            instance: line.instance,
        };
        if let Some(existing) = self.find_mut(&id) {
            *existing = CartLine::Combo(line);
        } else {
            debug!(line_id = %id, "Combo line added");
            self.lines.push(CartLine::Combo(line));
        }
        id
    }

    /// Add a combo from the deals listing: each constituent item goes in
    /// as its own plain line, once per unit of its quantity.
    pub fn add_combo_items(&mut self, combo: &Combo) {
        for item in &combo.items {
            for _ in 0..item.quantity {
                self.add_item(item);
            }
        }
    }

    /// Add a customized combo as a single line priced at
    /// `combo_price + surcharges`.
    pub fn add_customized_combo(&mut self, combo: &Combo, selection: &ComboSelection) -> LineId {
        self.add_combo(ComboLine {
            combo_id: combo.id,
            instance: Uuid::new_v4(),
            name: combo.name.clone(),
            unit_price: selection.total_price(combo.combo_price),
            image_url: combo.image_url.clone(),
            quantity: 1,
            customizations: selection.customizations(),
            constituent_items: combo.items.clone(),
        })
    }

    /// Set a line's quantity, flooring at 1.
    ///
    /// Returns `false` if no line has this id.
    pub fn update_quantity(&mut self, id: &LineId, quantity: u32) -> bool {
        let Some(line) = self.find_mut(id) else {
            return false;
        };
        *line.quantity_mut() = quantity.max(1);
        true
    }

    /// Returns `false` if no line has this id.
    pub fn increment(&mut self, id: &LineId) -> bool {
        let Some(quantity) = self.line(id).map(CartLine::quantity) else {
            return false;
        };
        self.update_quantity(id, quantity.saturating_add(1))
    }

    /// Decrease by one, stopping at 1. Returns `false` if no line has
    /// this id.
    pub fn decrement(&mut self, id: &LineId) -> bool {
        let Some(quantity) = self.line(id).map(CartLine::quantity) else {
            return false;
        };
        self.update_quantity(id, quantity.saturating_sub(1))
    }

    /// Delete a line. Returns `false` if no line has this id.
    pub fn remove_item(&mut self, id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != *id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == *id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn find_mut(&mut self, id: &LineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == *id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::combo::ComboGroup;
    use crate::models::combo::tests::burger_combo;

    fn item(id: i32, cents: i64) -> CartItem {
        CartItem {
            id: MenuItemId::new(id),
            name: format!("Item {id}"),
            unit_price: Decimal::new(cents, 2),
            image_url: None,
        }
    }

    fn brute_force_total(cart: &Cart) -> Decimal {
        let mut total = Decimal::ZERO;
        for line in cart.lines() {
            for _ in 0..line.quantity() {
                total += line.unit_price();
            }
        }
        total
    }

    #[test]
    fn test_cart_lifecycle() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Decimal::ZERO);

        let a = cart.add_item(item(1, 1000));
        cart.add_item(item(1, 1000));
        assert_eq!(cart.subtotal(), Decimal::from(20));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&a).unwrap().quantity(), 2);

        assert!(cart.remove_item(&a));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert!(!cart.remove_item(&a));
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = Cart::new();
        let a = cart.add_item(item(1, 250));

        assert!(cart.update_quantity(&a, 4));
        assert_eq!(cart.subtotal(), Decimal::from(10));

        assert!(cart.update_quantity(&a, 0));
        assert_eq!(cart.line(&a).unwrap().quantity(), 1);

        assert!(cart.decrement(&a));
        assert_eq!(cart.line(&a).unwrap().quantity(), 1);
        assert_eq!(cart.lines().len(), 1);

        assert!(cart.increment(&a));
        assert_eq!(cart.item_count(), 2);

        let missing = LineId::Item(MenuItemId::new(99));
        assert!(!cart.update_quantity(&missing, 3));
        assert!(!cart.increment(&missing));
        assert!(!cart.decrement(&missing));
    }

    #[test]
    fn test_total_matches_sum_after_mixed_operations() {
        let mut cart = Cart::new();
        let a = cart.add_item(item(1, 199));
        let b = cart.add_item(item(2, 1050));
        cart.add_item(item(1, 199));
        let combo = cart.add_customized_combo(&burger_combo(), &ComboSelection::default());
        assert_eq!(cart.subtotal(), brute_force_total(&cart));

        cart.update_quantity(&b, 3);
        cart.increment(&combo);
        assert_eq!(cart.subtotal(), brute_force_total(&cart));

        cart.remove_item(&a);
        cart.decrement(&b);
        assert_eq!(cart.subtotal(), brute_force_total(&cart));
        // 2 * 10.50 + 2 * 12.00
        assert_eq!(cart.subtotal(), Decimal::from(45));
    }

    #[test]
    fn test_add_combo_items_expands_constituents() {
        let mut cart = Cart::new();
        cart.add_combo_items(&burger_combo());

        assert_eq!(cart.lines().len(), 3);
        assert!(cart.lines().iter().all(|l| matches!(l, CartLine::Plain(_))));
        // Soda has quantity 2 in the combo.
        let soda = cart.line(&LineId::Item(MenuItemId::new(12))).unwrap();
        assert_eq!(soda.quantity(), 2);
        // 9 + 3.5 + 2 * 1.5
        assert_eq!(cart.subtotal(), Decimal::new(155, 1));
    }

    #[test]
    fn test_customized_combos_are_separate_lines() {
        let combo = burger_combo();
        let large = ComboSelection::default()
            .with(ComboGroup::Size, "large")
            .unwrap();

        let mut cart = Cart::new();
        let first = cart.add_customized_combo(&combo, &large);
        let second = cart.add_customized_combo(&combo, &ComboSelection::default());
        assert_ne!(first, second);
        assert_eq!(cart.lines().len(), 2);

        let line = cart.line(&first).unwrap();
        assert_eq!(line.unit_price(), Decimal::from(15));
        assert_eq!(line.customizations().unwrap().size, "Large (+50%)");
        // 15 + 12
        assert_eq!(cart.subtotal(), Decimal::from(27));
    }

    #[test]
    fn test_line_id_serialization() {
        let item = LineId::Item(MenuItemId::new(4));
        assert_eq!(serde_json::to_string(&item).unwrap(), "4");

        let instance = Uuid::nil();
        let combo = LineId::Combo {
            combo_id: ComboId::new(2),
            instance,
        };
        assert_eq!(
            serde_json::to_value(combo).unwrap(),
            serde_json::json!(format!("combo-2-{instance}"))
        );
    }
}
