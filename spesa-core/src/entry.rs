//! Item entry: turning raw form text into a [`ProductLine`].

use thiserror::Error;

use crate::current_list::CurrentList;
use crate::models::{Id, ProductLine};
use crate::total::parse_amount;

/// Default text of the quantity field.
pub const DEFAULT_QUANTITY: &str = "1";

/// Reasons an entry is refused. The list is never mutated when one of these
/// is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Product name cannot be empty")]
    BlankName,

    #[error("Invalid price '{0}'")]
    InvalidPrice(String),

    #[error("Price must be greater than zero")]
    NonPositivePrice,

    #[error("Invalid quantity '{0}': must be a whole number of at least 1")]
    InvalidQuantity(String),

    #[error("Quantity '{0}' is too large (at most {})", u32::MAX)]
    QuantityTooLarge(String),
}

/// Validate raw name, price and quantity text and build a line with a fresh id.
///
/// Price and quantity are read from their leading number: `"2.50€"` is a
/// price of 2.5 and `"2.5"` a quantity of 2.
pub fn parse_line(name: &str, price: &str, quantity: &str) -> Result<ProductLine, EntryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EntryError::BlankName);
    }

    let unit_price =
        parse_amount(price).ok_or_else(|| EntryError::InvalidPrice(price.trim().to_string()))?;
    if unit_price <= 0.0 {
        return Err(EntryError::NonPositivePrice);
    }

    let quantity = parse_quantity(quantity)?;

    Ok(ProductLine::new(name, unit_price, quantity))
}

/// Leading whole number of `text`; any fractional part or suffix is dropped.
fn parse_quantity(text: &str) -> Result<u32, EntryError> {
    let text = text.trim();
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &unsigned[..digits_len];

    if digits.is_empty() {
        return Err(EntryError::InvalidQuantity(text.to_string()));
    }

    // Only overflow can fail here: `digits` is non-empty and all ASCII digits
    match digits.parse::<u32>() {
        Ok(0) => Err(EntryError::InvalidQuantity(text.to_string())),
        Ok(quantity) => Ok(quantity),
        Err(_) => Err(EntryError::QuantityTooLarge(text.to_string())),
    }
}

/// The three text fields of the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl Default for ItemEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
        }
    }
}

impl ItemEntry {
    /// Fields pre-filled with the given text.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Reset to blank name, blank price, quantity `1`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the fields and, on success, prepend the new line to `list`
    /// and reset the fields.
    ///
    /// On failure neither `list` nor the fields change.
    pub fn submit(&mut self, list: &mut CurrentList) -> Result<Id, EntryError> {
        let line = parse_line(&self.name, &self.price, &self.quantity)?;
        let id = line.id.clone();
        list.add(line);
        self.reset();
        Ok(id)
    }
}
