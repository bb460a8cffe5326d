//! Session lifecycle: building a new list, editing a saved one, committing.
//!
//! [`ShoppingTracker`] owns the current list, the session store, the user
//! settings and the edit state, and is the only place that writes them to
//! the persistence gateway.
//!
//! # Persistence rules
//!
//! - All three keys are read exactly once, in [`ShoppingTracker::open`].
//! - History is written after every commit, settings after every change.
//! - The current list is written after every mutation, but only while
//!   [`EditState::Building`]. An edit in progress is never persisted, so an
//!   interrupted edit is simply lost instead of leaking into the next draft.

use chrono::{Local, NaiveDateTime};

use crate::current_list::CurrentList;
use crate::entry::{EntryError, ItemEntry};
use crate::history::SessionStore;
use crate::models::{AccentColor, Id, Settings, ShoppingSession, Theme};
use crate::storage::{KeyValueStore, Persistence, StorageKey};
use crate::total::{compute_total, compute_voucher_breakdown, voucher_visible, VoucherBreakdown};

/// Whether the current list is a new draft or an edit of a saved session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Building,
    Editing(Id),
}

impl EditState {
    /// Guard for writing the current list to storage.
    pub fn persists_current_list(&self) -> bool {
        matches!(self, EditState::Building)
    }

    /// Id of the session being edited, if any.
    pub fn editing_id(&self) -> Option<&Id> {
        match self {
            EditState::Building => None,
            EditState::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing(_))
    }
}

/// The screen being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Entry form and current list
    #[default]
    New,
    History,
    Settings,
}

impl View {
    /// Parse a view name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "new" => Some(View::New),
            "history" => Some(View::History),
            "settings" => Some(View::Settings),
            _ => None,
        }
    }
}

/// Result of a commit that did something.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Created { id: Id, total: f64 },
    Updated { id: Id, total: f64 },
}

impl CommitOutcome {
    /// Id of the session that was created or updated.
    pub fn id(&self) -> &Id {
        match self {
            CommitOutcome::Created { id, .. } | CommitOutcome::Updated { id, .. } => id,
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            CommitOutcome::Created { total, .. } | CommitOutcome::Updated { total, .. } => *total,
        }
    }
}

pub struct ShoppingTracker<S: KeyValueStore> {
    persistence: Persistence<S>,
    current: CurrentList,
    history: SessionStore,
    settings: Settings,
    state: EditState,
    view: View,
}

impl<S: KeyValueStore> ShoppingTracker<S> {
    /// Load history, the draft list and settings from `store`.
    ///
    /// Always starts in [`EditState::Building`]; an edit is never resumed.
    pub fn open(store: S) -> Self {
        let persistence = Persistence::new(store);
        let history: SessionStore = persistence.load(StorageKey::ShoppingHistory);
        let current: CurrentList = persistence.load(StorageKey::CurrentShoppingItems);
        let settings: Settings = persistence.load(StorageKey::AppSettings);

        tracing::debug!(
            "Opened tracker: {} session(s), {} draft line(s)",
            history.len(),
            current.len()
        );

        Self {
            persistence,
            current,
            history,
            settings,
            state: EditState::Building,
            view: View::New,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn current(&self) -> &CurrentList {
        &self.current
    }

    pub fn history(&self) -> &SessionStore {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Running total of the current list.
    pub fn total(&self) -> f64 {
        self.current.total()
    }

    /// Voucher breakdown of the running total, if there is anything to show.
    pub fn voucher_breakdown(&self) -> Option<VoucherBreakdown> {
        let total = self.total();
        let value = self.settings.meal_voucher_value;
        voucher_visible(total, value).then(|| compute_voucher_breakdown(total, value))
    }

    /// Submit the entry form against the current list.
    pub fn add_entry(&mut self, entry: &mut ItemEntry) -> Result<Id, EntryError> {
        let id = entry.submit(&mut self.current)?;
        tracing::debug!("Added line {}", id);
        self.persist_current_list();
        Ok(id)
    }

    /// Remove a line from the current list. No-op if it isn't there.
    pub fn remove_line(&mut self, id: &Id) -> bool {
        let removed = self.current.remove(id);
        if removed {
            tracing::debug!("Removed line {}", id);
            self.persist_current_list();
        }
        removed
    }

    /// Load a saved session into the current list for editing.
    ///
    /// Returns false, changing nothing, if `session_id` is unknown.
    pub fn start_edit(&mut self, session_id: &Id) -> bool {
        let items = match self.history.find_by_id(session_id) {
            Some(session) => session.items.clone(),
            None => {
                tracing::debug!("Cannot edit unknown session {}", session_id);
                return false;
            }
        };

        self.state = EditState::Editing(session_id.clone());
        self.current.replace_all(items);
        self.view = View::New;
        tracing::debug!("Editing session {}", session_id);
        true
    }

    /// Commit the current list, stamped with the local time.
    pub fn commit(&mut self) -> Option<CommitOutcome> {
        self.commit_at(Local::now().naive_local())
    }

    /// Commit the current list into history.
    ///
    /// While building this appends a new session; while editing it replaces
    /// the edited session's contents. Either way the current list is cleared
    /// and the tracker returns to building. An empty list is a no-op.
    pub fn commit_at(&mut self, at: NaiveDateTime) -> Option<CommitOutcome> {
        if self.current.is_empty() {
            return None;
        }

        let items = self.current.snapshot();
        let total = compute_total(&items);

        let outcome = match &self.state {
            EditState::Building => {
                let session = ShoppingSession::new(items, at);
                let id = session.id.clone();
                self.history.append(session);
                self.view = View::History;
                tracing::info!("Saved session {} ({:.2})", id, total);
                CommitOutcome::Created { id, total }
            }
            EditState::Editing(id) => {
                if !self.history.update_in_place(id, items, total, at) {
                    tracing::warn!("Edited session {} no longer exists", id);
                    return None;
                }
                tracing::info!("Updated session {} ({:.2})", id, total);
                CommitOutcome::Updated {
                    id: id.clone(),
                    total,
                }
            }
        };

        self.current.clear();
        self.state = EditState::Building;
        self.persist_history();
        self.persist_current_list();

        Some(outcome)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.persist_settings();
    }

    pub fn set_accent_color(&mut self, accent_color: AccentColor) {
        self.settings.accent_color = accent_color;
        self.persist_settings();
    }

    /// Set the value of one meal voucher. Negative or non-finite values are
    /// refused.
    pub fn set_meal_voucher_value(&mut self, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            return false;
        }
        self.settings.meal_voucher_value = value;
        self.persist_settings();
        true
    }

    /// Apply text typed into the voucher field; see [`Settings::parse_voucher_input`].
    pub fn apply_voucher_input(&mut self, text: &str) -> bool {
        match Settings::parse_voucher_input(text) {
            Some(value) => self.set_meal_voucher_value(value),
            None => false,
        }
    }

    fn persist_current_list(&self) {
        if self.state.persists_current_list() {
            self.persistence
                .save(StorageKey::CurrentShoppingItems, &self.current);
        }
    }

    fn persist_history(&self) {
        self.persistence.save(StorageKey::ShoppingHistory, &self.history);
    }

    fn persist_settings(&self) {
        self.persistence.save(StorageKey::AppSettings, &self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductLine;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn tracker() -> ShoppingTracker<MemoryStore> {
        ShoppingTracker::open(MemoryStore::new())
    }

    fn add(
        tracker: &mut ShoppingTracker<MemoryStore>,
        name: &str,
        price: &str,
        qty: &str,
    ) -> Id {
        tracker
            .add_entry(&mut ItemEntry::new(name, price, qty))
            .unwrap()
    }

    fn stored_draft(tracker: &ShoppingTracker<MemoryStore>) -> Option<Vec<ProductLine>> {
        tracker
            .store()
            .raw(StorageKey::CurrentShoppingItems)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn stored_history(tracker: &ShoppingTracker<MemoryStore>) -> Vec<ShoppingSession> {
        tracker
            .store()
            .raw(StorageKey::ShoppingHistory)
            .map(|raw| serde_json::from_str(&raw).unwrap())
            .unwrap_or_default()
    }

    #[test]
    fn test_open_empty_store() {
        let tracker = tracker();
        assert_eq!(*tracker.state(), EditState::Building);
        assert_eq!(tracker.view(), View::New);
        assert!(tracker.current().is_empty());
        assert!(tracker.history().is_empty());
        assert_eq!(*tracker.settings(), Settings::default());
    }

    #[test]
    fn test_open_restores_draft_and_history() {
        let draft = vec![ProductLine::new("Bread", 2.5, 1)];
        let session = ShoppingSession::new(vec![ProductLine::new("Milk", 1.2, 2)], at(8));
        let store = MemoryStore::new()
            .with_value(
                StorageKey::CurrentShoppingItems,
                serde_json::to_string(&draft).unwrap(),
            )
            .with_value(
                StorageKey::ShoppingHistory,
                serde_json::to_string(&vec![session.clone()]).unwrap(),
            )
            .with_value(StorageKey::AppSettings, r#"{"mealVoucherValue":5}"#);

        let tracker = ShoppingTracker::open(store);

        assert_eq!(tracker.current().lines(), draft.as_slice());
        assert_eq!(tracker.history().find_by_id(&session.id), Some(&session));
        assert_eq!(tracker.settings().meal_voucher_value, 5.0);
        assert_eq!(tracker.settings().theme, Theme::Dark);
        assert_eq!(*tracker.state(), EditState::Building);
    }

    #[test]
    fn test_open_accepts_non_uuid_ids() {
        let history = r#"[{
            "id": "2024-05-01T10:15:00.000Z",
            "date": "1 May 2024, 12:15",
            "items": [{"id": "id-lq2x9k-4f8a1b2c", "name": "Milk", "price": 1.2, "quantity": 2}],
            "total": 2.4
        }]"#;
        let store = MemoryStore::new().with_value(StorageKey::ShoppingHistory, history);
        let mut tracker = ShoppingTracker::open(store);

        let id = Id::from("2024-05-01T10:15:00.000Z");
        assert_eq!(tracker.history().len(), 1);
        assert!(tracker.start_edit(&id));
        assert!(tracker.remove_line(&Id::from("id-lq2x9k-4f8a1b2c")));
        add(&mut tracker, "Eggs", "3", "1");
        tracker.commit_at(at(12));

        let persisted = stored_history(&tracker);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, id);
        assert_eq!(persisted[0].items[0].name, "Eggs");
    }

    #[test]
    fn test_open_with_unreadable_store_uses_defaults() {
        let store = MemoryStore::new().with_value(StorageKey::ShoppingHistory, "[]");
        store.set_failing(true);

        let tracker = ShoppingTracker::open(store);
        assert!(tracker.history().is_empty());
        assert_eq!(*tracker.settings(), Settings::default());
    }

    #[test]
    fn test_add_entry_prepends_and_persists() {
        let mut tracker = tracker();
        add(&mut tracker, "Bread", "2.50", "1");
        let milk = add(&mut tracker, "Milk", "1,20", "2");

        assert_eq!(tracker.current().lines()[0].id, milk);
        assert_eq!(stored_draft(&tracker).unwrap().len(), 2);
    }

    #[test]
    fn test_add_invalid_entry_changes_nothing() {
        let mut tracker = tracker();
        add(&mut tracker, "Bread", "2.50", "1");
        let before = tracker.current().clone();

        let mut entry = ItemEntry::new("Eggs", "0", "1");
        assert_eq!(
            tracker.add_entry(&mut entry),
            Err(EntryError::NonPositivePrice)
        );
        assert_eq!(tracker.current(), &before);
    }

    #[test]
    fn test_remove_line() {
        let mut tracker = tracker();
        let bread = add(&mut tracker, "Bread", "2.50", "1");

        assert!(tracker.remove_line(&bread));
        assert!(tracker.current().is_empty());
        assert_eq!(stored_draft(&tracker), Some(Vec::new()));
        assert!(!tracker.remove_line(&bread));
    }

    #[test]
    fn test_new_session_round_trip() {
        let mut tracker = tracker();
        add(&mut tracker, "Bread", "2.50", "1");

        let outcome = tracker.commit_at(at(10)).unwrap();

        assert!(matches!(outcome, CommitOutcome::Created { .. }));
        assert_eq!(outcome.total(), 2.5);
        assert_eq!(tracker.history().len(), 1);
        let session = tracker.history().find_by_id(outcome.id()).unwrap();
        assert_eq!(session.total, 2.5);
        assert_eq!(session.items[0].name, "Bread");
        assert!(tracker.current().is_empty());
        assert_eq!(*tracker.state(), EditState::Building);
        assert_eq!(tracker.view(), View::History);

        assert_eq!(stored_history(&tracker).len(), 1);
        assert_eq!(stored_draft(&tracker), Some(Vec::new()));
    }

    #[test]
    fn test_edit_round_trip() {
        let mut tracker = tracker();
        add(&mut tracker, "Milk", "1.20", "2");
        let s1 = tracker.commit_at(at(8)).unwrap().id().clone();
        assert!((tracker.history().find_by_id(&s1).unwrap().total - 2.4).abs() < 1e-9);

        assert!(tracker.start_edit(&s1));
        assert_eq!(*tracker.state(), EditState::Editing(s1.clone()));
        assert_eq!(tracker.view(), View::New);
        assert_eq!(tracker.current().len(), 1);
        let milk = &tracker.current().lines()[0];
        assert_eq!((milk.name.as_str(), milk.unit_price, milk.quantity), ("Milk", 1.2, 2));

        let milk_id = milk.id.clone();
        assert!(tracker.remove_line(&milk_id));
        add(&mut tracker, "Eggs", "3.00", "1");

        let outcome = tracker.commit_at(at(12)).unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Updated {
                id: s1.clone(),
                total: 3.0
            }
        );

        let session = tracker.history().find_by_id(&s1).unwrap();
        assert_eq!(session.items.len(), 1);
        assert_eq!(session.items[0].name, "Eggs");
        assert_eq!(session.total, 3.0);
        assert_eq!(session.date, "17 October 2026, 12:00 (mod.)");
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(*tracker.state(), EditState::Building);
        assert!(tracker.current().is_empty());

        let persisted = stored_history(&tracker);
        assert_eq!(persisted[0].id, s1);
        assert_eq!(persisted[0].total, 3.0);
    }

    #[test]
    fn test_commit_recomputes_total() {
        let mut tracker = tracker();
        add(&mut tracker, "A", "2", "3");
        add(&mut tracker, "B", "1.5", "2");
        let id = tracker.commit_at(at(9)).unwrap().id().clone();
        assert_eq!(tracker.history().find_by_id(&id).unwrap().total, 9.0);

        tracker.start_edit(&id);
        add(&mut tracker, "C", "1", "1");
        tracker.commit_at(at(10));
        assert_eq!(tracker.history().find_by_id(&id).unwrap().total, 10.0);
    }

    #[test]
    fn test_commit_empty_is_noop_while_building() {
        let mut tracker = tracker();
        assert!(tracker.commit_at(at(9)).is_none());
        assert!(tracker.history().is_empty());
        assert_eq!(*tracker.state(), EditState::Building);
        assert_eq!(tracker.view(), View::New);
        assert!(tracker.store().raw(StorageKey::ShoppingHistory).is_none());
    }

    #[test]
    fn test_commit_empty_is_noop_while_editing() {
        let mut tracker = tracker();
        add(&mut tracker, "Milk", "1.20", "2");
        let id = tracker.commit_at(at(8)).unwrap().id().clone();
        let history_before = tracker.history().clone();

        tracker.start_edit(&id);
        let only = tracker.current().lines()[0].id.clone();
        tracker.remove_line(&only);

        assert!(tracker.commit_at(at(9)).is_none());
        assert_eq!(*tracker.state(), EditState::Editing(id));
        assert_eq!(tracker.history(), &history_before);
    }

    #[test]
    fn test_saved_session_is_isolated_from_current_list() {
        let mut tracker = tracker();
        add(&mut tracker, "Bread", "2.50", "1");
        let id = tracker.commit_at(at(9)).unwrap().id().clone();
        let saved = tracker.history().find_by_id(&id).unwrap().clone();

        add(&mut tracker, "Cheese", "4", "1");
        assert!(tracker.start_edit(&id));
        let bread = tracker.current().lines()[0].id.clone();
        tracker.remove_line(&bread);
        add(&mut tracker, "Jam", "3", "1");

        // Nothing committed yet: the stored session is untouched
        assert_eq!(tracker.history().find_by_id(&id), Some(&saved));
    }

    #[test]
    fn test_start_edit_unknown_id_is_noop() {
        let mut tracker = tracker();
        add(&mut tracker, "Bread", "2.50", "1");
        tracker.set_view(View::History);
        let before = tracker.current().clone();

        assert!(!tracker.start_edit(&Id::new()));
        assert_eq!(*tracker.state(), EditState::Building);
        assert_eq!(tracker.view(), View::History);
        assert_eq!(tracker.current(), &before);
    }

    #[test]
    fn test_edits_are_not_persisted() {
        let mut tracker = tracker();
        add(&mut tracker, "Milk", "1.20", "2");
        let id = tracker.commit_at(at(8)).unwrap().id().clone();
        add(&mut tracker, "Draft", "1", "1");
        let draft = stored_draft(&tracker).unwrap();
        assert_eq!(draft.len(), 1);

        tracker.start_edit(&id);
        add(&mut tracker, "Eggs", "3", "1");
        let milk = tracker
            .current()
            .lines()
            .iter()
            .find(|l| l.name == "Milk")
            .unwrap()
            .id
            .clone();
        tracker.remove_line(&milk);

        assert_eq!(stored_draft(&tracker).unwrap(), draft);

        // A restart while editing comes back building, with the old draft
        let reopened = ShoppingTracker::open(
            MemoryStore::new().with_value(
                StorageKey::CurrentShoppingItems,
                tracker
                    .store()
                    .raw(StorageKey::CurrentShoppingItems)
                    .unwrap(),
            ),
        );
        assert_eq!(*reopened.state(), EditState::Building);
        assert_eq!(reopened.current().lines(), draft.as_slice());
    }

    #[test]
    fn test_persistence_failure_is_not_fatal() {
        let mut tracker = tracker();
        tracker.store().set_failing(true);

        add(&mut tracker, "Bread", "2.50", "1");
        let outcome = tracker.commit_at(at(9));

        assert!(outcome.is_some());
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn test_voucher_breakdown_gate() {
        let mut tracker = tracker();
        assert!(tracker.voucher_breakdown().is_none());

        add(&mut tracker, "Groceries", "17,5", "1");
        assert_eq!(
            tracker.voucher_breakdown(),
            Some(VoucherBreakdown {
                used: 2,
                remaining_for_next: 6.5
            })
        );

        assert!(tracker.apply_voucher_input(""));
        assert!(tracker.voucher_breakdown().is_none());
    }

    #[test]
    fn test_settings_setters_persist() {
        let mut tracker = tracker();
        tracker.set_theme(Theme::Amoled);
        tracker.set_accent_color(AccentColor::Violet);
        assert!(tracker.set_meal_voucher_value(7.0));
        assert!(!tracker.set_meal_voucher_value(-1.0));
        assert!(!tracker.apply_voucher_input("abc"));

        let raw = tracker.store().raw(StorageKey::AppSettings).unwrap();
        let stored: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.theme, Theme::Amoled);
        assert_eq!(stored.accent_color, AccentColor::Violet);
        assert_eq!(stored.meal_voucher_value, 7.0);
        assert_eq!(stored, *tracker.settings());
    }

    #[test]
    fn test_view_from_name() {
        assert_eq!(View::from_name("History"), Some(View::History));
        assert_eq!(View::from_name("settings"), Some(View::Settings));
        assert_eq!(View::from_name("cart"), None);
    }
}
