//! Input validation that runs before anything is sent.
//!
//! Each form type owns the raw user input and turns it into a wire payload
//! through `validate`. A validation failure means no request is made.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use bistro_core::{ComboId, Email, EmailError, MenuItemId, UserRole};

use crate::error::ClientError;
use crate::models::reservation::{RESERVATION_TIME_FORMAT, ReservationPayload};
use crate::models::review::ReviewPayload;

/// Image extensions the backend accepts for menu photos.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// Why a form was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{field} must be in the form {expected}")]
    Format {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("Unsupported image type '{0}' (use png, jpg, gif or webp)")]
    UnsupportedImage(String),

    #[error("Nothing to update")]
    NothingToUpdate,
}

/// Trim and drop empty strings.
fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    non_empty(value)
        .map(str::to_owned)
        .ok_or(ValidationError::Required(field))
}

fn optional(value: Option<&str>) -> Option<String> {
    value.and_then(non_empty).map(str::to_owned)
}

// =============================================================================
// Accounts
// =============================================================================

/// Validate login input.
///
/// # Errors
///
/// Returns `ValidationError` for a malformed email or an empty password.
pub fn validate_login(email: &str, password: &SecretString) -> Result<Email, ValidationError> {
    let email = Email::parse(email)?;
    if password.expose_secret().is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    Ok(email)
}

/// New account details.
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub address: Option<String>,
    pub role: UserRole,
}

/// Body of `POST /auth/register`.
#[derive(Serialize)]
pub struct RegisterPayload<'a> {
    pub username: String,
    pub email: Email,
    pub password: &'a str,
    pub address: Option<String>,
    pub role: UserRole,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns `ValidationError` if the username or password is empty or
    /// the email is malformed.
    pub fn validate(&self) -> Result<RegisterPayload<'_>, ValidationError> {
        let username = required(&self.username, "Username")?;
        let email = Email::parse(&self.email)?;
        let password = self.password.expose_secret();
        if password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }

        Ok(RegisterPayload {
            username,
            email,
            password,
            address: optional(self.address.as_deref()),
            role: self.role,
        })
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for RegisterPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// Table booking input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    /// Local date and time, `YYYY-MM-DDTHH:MM`.
    pub time: String,
    pub party_size: u32,
    pub requests: Option<String>,
}

impl ReservationForm {
    pub const MIN_PARTY: u32 = 1;
    pub const MAX_PARTY: u32 = 20;

    /// # Errors
    ///
    /// Returns `ValidationError` if the time is missing or malformed, or
    /// the party size is outside 1..=20.
    pub fn validate(&self) -> Result<ReservationPayload, ValidationError> {
        let raw_time = non_empty(&self.time).ok_or(ValidationError::Required("Time"))?;
        let time = NaiveDateTime::parse_from_str(raw_time, RESERVATION_TIME_FORMAT).map_err(|_| {
            ValidationError::Format {
                field: "Time",
                expected: "YYYY-MM-DDTHH:MM",
            }
        })?;

        if !(Self::MIN_PARTY..=Self::MAX_PARTY).contains(&self.party_size) {
            return Err(ValidationError::OutOfRange {
                field: "Party size",
                min: Self::MIN_PARTY,
                max: Self::MAX_PARTY,
            });
        }
        let party_size = u8::try_from(self.party_size).map_err(|_| ValidationError::OutOfRange {
            field: "Party size",
            min: Self::MIN_PARTY,
            max: Self::MAX_PARTY,
        })?;

        Ok(ReservationPayload {
            time,
            party_size,
            requests: optional(self.requests.as_deref()),
        })
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// What a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewTarget {
    Item(MenuItemId),
    Combo(ComboId),
}

impl FromStr for ReviewTarget {
    type Err = ValidationError;

    /// Accepts `item:<id>`, `combo:<id>` or a bare item id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::Format {
            field: "Review target",
            expected: "item:<id> or combo:<id>",
        };
        let s = s.trim();
        match s.split_once(':') {
            Some(("combo", id)) => id.parse().map(Self::Combo).map_err(|_| invalid()),
            Some(("item", id)) => id.parse().map(Self::Item).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
            None => s.parse().map(Self::Item).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "item:{id}"),
            Self::Combo(id) => write!(f, "combo:{id}"),
        }
    }
}

/// A star rating with an optional comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub target: Option<ReviewTarget>,
    pub rating: u8,
    pub comment: Option<String>,
}

impl ReviewForm {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    /// # Errors
    ///
    /// Returns `ValidationError` if no target is chosen or the rating is
    /// outside 1..=5.
    pub fn validate(&self) -> Result<(ReviewTarget, ReviewPayload), ValidationError> {
        let target = self.target.ok_or(ValidationError::Required("Product to review"))?;
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                field: "Rating",
                min: u32::from(Self::MIN_RATING),
                max: u32::from(Self::MAX_RATING),
            });
        }
        Ok((
            target,
            ReviewPayload {
                rating: self.rating,
                comment: optional(self.comment.as_deref()),
            },
        ))
    }
}

// =============================================================================
// Admin: categories
// =============================================================================

/// Category create/update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Body of `POST`/`PUT /admin/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl CategoryForm {
    /// # Errors
    ///
    /// Returns `ValidationError::Required` if the name is blank.
    pub fn validate(&self) -> Result<CategoryPayload, ValidationError> {
        Ok(CategoryPayload {
            name: required(&self.name, "Category name")?,
            description: optional(self.description.as_deref()).unwrap_or_default(),
            is_active: self.is_active,
        })
    }
}

// =============================================================================
// Admin: menu items
// =============================================================================

/// A photo to attach to a menu item.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// # Errors
    ///
    /// Returns `ValidationError::UnsupportedImage` unless the file name
    /// ends in png, jpg, jpeg, gif or webp.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content_type = IMAGE_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
            .ok_or_else(|| ValidationError::UnsupportedImage(file_name.clone()))?;

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for an unsupported extension and
    /// `ClientError::Io` if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(ValidationError::Required("Image file name"))?
            .to_owned();
        // Check the extension before reading the whole file.
        let probe = Self::new(file_name, Vec::new())?;
        let bytes = std::fs::read(path)?;
        Ok(Self { bytes, ..probe })
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Validated menu item fields, ready to become a multipart form.
///
/// Unset fields are left out of the request so an update only touches
/// what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub is_deal: Option<bool>,
    pub availability: Option<bool>,
    pub image: Option<ImageUpload>,
}

impl MenuItemFields {
    /// Text parts in the order the backend reads them.
    #[must_use]
    pub fn text_parts(&self) -> Vec<(&'static str, String)> {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(("name", name.clone()));
        }
        if let Some(description) = &self.description {
            parts.push(("description", description.clone()));
        }
        if let Some(price) = self.price {
            parts.push(("price", price.to_string()));
        }
        if let Some(category) = &self.category {
            parts.push(("category", category.clone()));
        }
        if let Some(is_deal) = self.is_deal {
            parts.push(("is_deal", is_deal.to_string()));
        }
        if let Some(availability) = self.availability {
            parts.push(("availability", availability.to_string()));
        }
        parts
    }
}

fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let price = Decimal::from_str(raw.trim()).map_err(|_| ValidationError::InvalidPrice)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(price)
}

/// New menu item input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemForm {
    pub name: String,
    pub description: Option<String>,
    /// Raw price text, e.g. `"8.50"`.
    pub price: String,
    pub category: String,
    pub is_deal: bool,
    pub image: Option<ImageUpload>,
}

impl MenuItemForm {
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or category is blank or the
    /// price is not a non-negative number.
    pub fn validate(self) -> Result<MenuItemFields, ValidationError> {
        let name = required(&self.name, "Name")?;
        let price = parse_price(&self.price)?;
        let category = required(&self.category, "Category")?;

        Ok(MenuItemFields {
            name: Some(name),
            description: Some(optional(self.description.as_deref()).unwrap_or_default()),
            price: Some(price),
            category: Some(category),
            is_deal: Some(self.is_deal),
            availability: None,
            image: self.image,
        })
    }
}

/// Partial menu item update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub is_deal: Option<bool>,
    pub availability: Option<bool>,
    pub image: Option<ImageUpload>,
}

impl MenuItemUpdate {
    /// Flip availability and nothing else.
    #[must_use]
    pub fn availability(available: bool) -> Self {
        Self {
            availability: Some(available),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError` if a provided name or category is blank,
    /// a provided price is invalid, or nothing is set at all.
    pub fn validate(self) -> Result<MenuItemFields, ValidationError> {
        let fields = MenuItemFields {
            name: self
                .name
                .as_deref()
                .map(|name| required(name, "Name"))
                .transpose()?,
            description: self.description.map(|d| d.trim().to_owned()),
            price: self.price.as_deref().map(parse_price).transpose()?,
            category: self
                .category
                .as_deref()
                .map(|category| required(category, "Category"))
                .transpose()?,
            is_deal: self.is_deal,
            availability: self.availability,
            image: self.image,
        };

        if fields == MenuItemFields::default() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(fields)
    }
}
