//! The in-progress list of product lines not yet committed to history.

use serde::{Deserialize, Serialize};

use crate::models::{Id, ProductLine};
use crate::total::compute_total;

/// Mutable, newest-first collection of product lines.
///
/// Serializes as a plain JSON array, which is the layout stored under
/// `currentShoppingItems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentList {
    lines: Vec<ProductLine>,
}

impl CurrentList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a line.
    pub fn add(&mut self, line: ProductLine) {
        self.lines.insert(0, line);
    }

    /// Remove the line with `id`.
    /// Returns true if a line was removed.
    pub fn remove(&mut self, id: &Id) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != len_before
    }

    /// Discard everything and take `lines` as the new contents.
    pub fn replace_all(&mut self, lines: Vec<ProductLine>) {
        self.lines = lines;
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order, newest first
    pub fn lines(&self) -> &[ProductLine] {
        &self.lines
    }

    pub fn find(&self, id: &Id) -> Option<&ProductLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not units)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Owned copy of the lines, independent of this list.
    pub fn snapshot(&self) -> Vec<ProductLine> {
        self.lines.clone()
    }

    /// Running total of the list
    pub fn total(&self) -> f64 {
        compute_total(&self.lines)
    }
}
