//! Terminal output.
//!
//! Results go to stdout; notices that are not the command's result go to
//! stderr so output stays pipeable.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Display;

use rust_decimal::Decimal;

use bistro_core::format_money;

pub fn line(text: impl Display) {
    println!("{text}");
}

pub fn blank() {
    println!();
}

pub fn heading(title: &str) {
    println!("{title}");
    println!("{}", "-".repeat(title.chars().count()));
}

pub fn notice(text: impl Display) {
    eprintln!("{text}");
}

/// `label ....... $12.50`, right-aligned to a fixed width.
pub fn money_row(label: &str, amount: Decimal) {
    println!("{label:<24}{:>10}", format_money(amount));
}

/// Comma-separated list, or `-` when empty.
pub fn list<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list() {
        assert_eq!(list::<String>(&[]), "-");
        assert_eq!(list(&["accepted", "denied"]), "accepted, denied");
    }
}
