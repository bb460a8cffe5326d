use serde::{Deserialize, Serialize};
use std::fmt;

use super::Id;
use crate::total::format_amount;

/// A product on a shopping list: what was bought, at what unit price, how many.
///
/// Lines are only built through [`crate::entry::parse_line`] (or [`ProductLine::new`]
/// with already-valid values), so `unit_price > 0`, `quantity >= 1` and a
/// non-blank trimmed `name` hold for every line in a list or session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductLine {
    pub id: Id,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl ProductLine {
    /// Build a line with a fresh id. Callers guarantee the values are valid.
    pub fn new(name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, unrounded.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} x {}) {}",
            self.name,
            self.quantity,
            format_amount(self.unit_price),
            format_amount(self.subtotal())
        )
    }
}
