//! Keys of the local key/value store.

/// The independent blobs the app persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    ShoppingHistory,
    CurrentShoppingItems,
    AppSettings,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::ShoppingHistory,
        StorageKey::CurrentShoppingItems,
        StorageKey::AppSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::ShoppingHistory => "shoppingHistory",
            StorageKey::CurrentShoppingItems => "currentShoppingItems",
            StorageKey::AppSettings => "appSettings",
        }
    }

    /// Returns the filename used by [`super::FileStore`] for this key.
    pub fn filename(&self) -> &'static str {
        match self {
            StorageKey::ShoppingHistory => "shoppingHistory.json",
            StorageKey::CurrentShoppingItems => "currentShoppingItems.json",
            StorageKey::AppSettings => "appSettings.json",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
