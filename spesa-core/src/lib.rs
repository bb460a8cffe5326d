//! Spesa Core Library
//!
//! Shopping list model, total and meal-voucher calculation, session history
//! and the lifecycle that ties them to local persistence.

pub mod current_list;
pub mod entry;
pub mod history;
pub mod lifecycle;
pub mod models;
pub mod storage;
pub mod total;

pub use current_list::CurrentList;
pub use entry::{parse_line, EntryError, ItemEntry};
pub use history::SessionStore;
pub use lifecycle::{CommitOutcome, EditState, ShoppingTracker, View};
pub use models::{
    AccentColor, AccentPalette, Appearance, Id, ProductLine, Settings, ShoppingSession, Theme,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence, StorageError, StorageKey};
pub use total::{
    compute_total, compute_voucher_breakdown, format_amount, parse_amount, voucher_visible,
    VoucherBreakdown,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
