//! Newtype IDs for server-owned records.
//!
//! Every record the backend hands out is keyed by an integer. The
//! `define_id!` macro wraps those integers so a menu item ID can never be
//! passed where an order ID is expected.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `Display`, `FromStr`, `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use bistro_core::define_id;
/// define_id!(TableId);
/// define_id!(ShiftId);
///
/// let table = TableId::new(4);
/// let shift = ShiftId::new(4);
/// assert_eq!(table.as_i32(), shift.as_i32());
///
/// // These are different types, so this won't compile:
/// // let _: TableId = shift;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(MenuItemId);
define_id!(ComboId);
define_id!(OrderId);
define_id!(CategoryId);
define_id!(ReservationId);
define_id!(ReviewId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = MenuItemId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: MenuItemId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_from_str() {
        let id: OrderId = " 17 ".parse().unwrap();
        assert_eq!(id.as_i32(), 17);
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ComboId::new(3).to_string(), "3");
    }
}
