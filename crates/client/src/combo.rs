//! Combo customization options and pricing.
//!
//! A customized combo costs its base price plus one surcharge from each of
//! four option groups. Every group has a free default, so an untouched
//! selection costs exactly the base price.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `cents / 100` as a const decimal.
const fn dollars(cents: u32) -> Decimal {
    Decimal::from_parts(cents, 0, 0, false, 2)
}

/// One choice within a [`ComboGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboOption {
    /// Stable key used on the command line (`onion_rings`).
    pub key: &'static str,
    /// Name shown to people and stored on the cart line.
    pub name: &'static str,
    pub surcharge: Decimal,
}

const fn option(key: &'static str, name: &'static str, cents: u32) -> ComboOption {
    ComboOption {
        key,
        name,
        surcharge: dollars(cents),
    }
}

const SAUCES: &[ComboOption] = &[
    option("ketchup", "Ketchup", 0),
    option("mayo", "Mayonnaise", 0),
    option("bbq", "BBQ Sauce", 50),
    option("ranch", "Ranch", 50),
    option("sriracha", "Sriracha Mayo", 75),
    option("garlic", "Garlic Aioli", 75),
];

const SIDES: &[ComboOption] = &[
    option("fries", "French Fries", 0),
    option("onion_rings", "Onion Rings", 150),
    option("coleslaw", "Coleslaw", 100),
    option("salad", "Side Salad", 200),
    option("sweet_potato", "Sweet Potato Fries", 150),
];

const DRINKS: &[ComboOption] = &[
    option("coke", "Coca-Cola", 0),
    option("sprite", "Sprite", 0),
    option("fanta", "Fanta", 0),
    option("water", "Mineral Water", 0),
    option("iced_tea", "Iced Tea", 50),
];

const SIZES: &[ComboOption] = &[
    option("regular", "Regular", 0),
    option("large", "Large (+50%)", 300),
];

/// The four independent customization groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboGroup {
    Sauce,
    Side,
    Drink,
    Size,
}

impl ComboGroup {
    pub const ALL: [Self; 4] = [Self::Sauce, Self::Side, Self::Drink, Self::Size];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sauce => "sauce",
            Self::Side => "side",
            Self::Drink => "drink",
            Self::Size => "size",
        }
    }

    /// Every option in this group; the first one is the default.
    #[must_use]
    pub const fn options(&self) -> &'static [ComboOption] {
        match self {
            Self::Sauce => SAUCES,
            Self::Side => SIDES,
            Self::Drink => DRINKS,
            Self::Size => SIZES,
        }
    }

    #[must_use]
    pub const fn default_option(&self) -> &'static ComboOption {
        &self.options()[0]
    }

    /// Look up an option by key, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ComboError::UnknownOption` if the group has no such key.
    pub fn find(&self, key: &str) -> Result<&'static ComboOption, ComboError> {
        let key = key.trim();
        self.options()
            .iter()
            .find(|option| option.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| ComboError::UnknownOption {
                group: *self,
                value: key.to_owned(),
            })
    }
}

impl fmt::Display for ComboGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors building a [`ComboSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboError {
    #[error("unknown {group} option '{value}' (expected one of: {})", valid_keys(.group))]
    UnknownOption { group: ComboGroup, value: String },
}

fn valid_keys(group: &ComboGroup) -> String {
    group
        .options()
        .iter()
        .map(|option| option.key)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A full set of choices for one customized combo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboSelection {
    sauce: &'static ComboOption,
    side: &'static ComboOption,
    drink: &'static ComboOption,
    size: &'static ComboOption,
    special_instructions: Option<String>,
}

impl Default for ComboSelection {
    fn default() -> Self {
        Self {
            sauce: ComboGroup::Sauce.default_option(),
            side: ComboGroup::Side.default_option(),
            drink: ComboGroup::Drink.default_option(),
            size: ComboGroup::Size.default_option(),
            special_instructions: None,
        }
    }
}

impl ComboSelection {
    /// Replace the choice in `group`.
    ///
    /// # Errors
    ///
    /// Returns `ComboError::UnknownOption` if `key` is not in the group.
    pub fn with(mut self, group: ComboGroup, key: &str) -> Result<Self, ComboError> {
        let option = group.find(key)?;
        *self.slot_mut(group) = option;
        Ok(self)
    }

    /// Free-text note for the kitchen. Blank text clears it.
    #[must_use]
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        let trimmed = instructions.trim();
        self.special_instructions = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    #[must_use]
    pub const fn get(&self, group: ComboGroup) -> &'static ComboOption {
        match group {
            ComboGroup::Sauce => self.sauce,
            ComboGroup::Side => self.side,
            ComboGroup::Drink => self.drink,
            ComboGroup::Size => self.size,
        }
    }

    fn slot_mut(&mut self, group: ComboGroup) -> &mut &'static ComboOption {
        match group {
            ComboGroup::Sauce => &mut self.sauce,
            ComboGroup::Side => &mut self.side,
            ComboGroup::Drink => &mut self.drink,
            ComboGroup::Size => &mut self.size,
        }
    }

    /// Sum of the four surcharges.
    #[must_use]
    pub fn extra(&self) -> Decimal {
        ComboGroup::ALL
            .iter()
            .map(|group| self.get(*group).surcharge)
            .sum()
    }

    /// `base + extra()`.
    #[must_use]
    pub fn total_price(&self, base: Decimal) -> Decimal {
        base + self.extra()
    }

    /// The choices by display name, as stored on the cart line.
    #[must_use]
    pub fn customizations(&self) -> Customizations {
        Customizations {
            sauce: self.sauce.name.to_owned(),
            side: self.side.name.to_owned(),
            drink: self.drink.name.to_owned(),
            size: self.size.name.to_owned(),
            special_instructions: self.special_instructions.clone(),
        }
    }
}

/// Parses a group name such as `side`.
impl FromStr for ComboGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown combo group '{s}' (expected sauce, side, drink or size)"))
    }
}

/// What was chosen for a customized combo line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customizations {
    pub sauce: String,
    pub side: String,
    pub drink: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl fmt::Display for Customizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.sauce, self.side, self.drink, self.size)?;
        if let Some(note) = &self.special_instructions {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cost_nothing() {
        let selection = ComboSelection::default();
        assert_eq!(selection.extra(), Decimal::ZERO);
        assert_eq!(
            selection.total_price(Decimal::new(1299, 2)),
            Decimal::new(1299, 2)
        );
        assert_eq!(selection.get(ComboGroup::Sauce).key, "ketchup");
        assert_eq!(selection.get(ComboGroup::Side).key, "fries");
        assert_eq!(selection.get(ComboGroup::Drink).key, "coke");
        assert_eq!(selection.get(ComboGroup::Size).key, "regular");
    }

    #[test]
    fn test_every_default_is_free() {
        for group in ComboGroup::ALL {
            assert_eq!(group.default_option().surcharge, Decimal::ZERO);
            assert!(group.options().iter().all(|o| !o.surcharge.is_sign_negative()));
        }
    }

    #[test]
    fn test_surcharges_add_up() {
        let selection = ComboSelection::default()
            .with(ComboGroup::Sauce, "sriracha")
            .unwrap()
            .with(ComboGroup::Side, "onion_rings")
            .unwrap()
            .with(ComboGroup::Drink, "iced_tea")
            .unwrap()
            .with(ComboGroup::Size, "LARGE")
            .unwrap();

        // 0.75 + 1.50 + 0.50 + 3.00
        assert_eq!(selection.extra(), Decimal::new(575, 2));
        assert_eq!(
            selection.total_price(Decimal::from(12)),
            Decimal::new(1775, 2)
        );
    }

    #[test]
    fn test_unknown_option() {
        let err = ComboSelection::default()
            .with(ComboGroup::Drink, "milkshake")
            .unwrap_err();
        assert_eq!(
            err,
            ComboError::UnknownOption {
                group: ComboGroup::Drink,
                value: "milkshake".to_string()
            }
        );
        assert!(err.to_string().contains("iced_tea"));
    }

    #[test]
    fn test_customizations_use_display_names() {
        let selection = ComboSelection::default()
            .with(ComboGroup::Side, "salad")
            .unwrap()
            .with_instructions("  no onions ");
        let custom = selection.customizations();
        assert_eq!(custom.side, "Side Salad");
        assert_eq!(custom.special_instructions.as_deref(), Some("no onions"));
        assert_eq!(
            custom.to_string(),
            "Ketchup, Side Salad, Coca-Cola, Regular (no onions)"
        );

        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json["specialInstructions"], "no onions");
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("Side".parse::<ComboGroup>().unwrap(), ComboGroup::Side);
        assert!("topping".parse::<ComboGroup>().is_err());
    }
}
