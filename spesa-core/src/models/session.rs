//! Finalized shopping sessions kept in history.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Id, ProductLine};
use crate::total::{compute_total, format_amount};

/// Format used for the display timestamp of a session.
pub const DATE_FORMAT: &str = "%-d %B %Y, %H:%M";

/// Appended to the display timestamp of a session that was edited after saving.
pub const MODIFIED_MARKER: &str = " (mod.)";

/// A committed shopping list.
///
/// `items` is an owned snapshot, never shared with the current list.
/// `total` is derived from `items` whenever the session is created or updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingSession {
    pub id: Id,
    /// Display-formatted creation (or last modification) time.
    pub date: String,
    pub items: Vec<ProductLine>,
    pub total: f64,
}

impl ShoppingSession {
    /// Create a session with a fresh id, computing its total from `items`.
    pub fn new(items: Vec<ProductLine>, at: NaiveDateTime) -> Self {
        let total = compute_total(&items);
        Self {
            id: Id::new(),
            date: format_timestamp(at),
            items,
            total,
        }
    }

    /// Whether this session was edited after it was first saved.
    pub fn is_modified(&self) -> bool {
        self.date.ends_with(MODIFIED_MARKER)
    }
}

impl fmt::Display for ShoppingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "Total: {}", format_amount(self.total))?;
        writeln!(f, "{}", "-".repeat(44))?;
        for item in &self.items {
            writeln!(
                f,
                "{:<30} {:>12}",
                format!("{} (x{})", item.name, item.quantity),
                format_amount(item.subtotal())
            )?;
        }
        Ok(())
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(DATE_FORMAT).to_string()
}

pub fn format_modified_timestamp(at: NaiveDateTime) -> String {
    format!("{}{}", format_timestamp(at), MODIFIED_MARKER)
}
