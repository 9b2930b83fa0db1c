use crate::domain::{format_long, slugify};
use crate::infrastructure::{SessionStorage, StateChange, StateHook};
use anyhow::{Context, Result};

/// Plugin that mirrors the selected date into session storage, keyed by the
/// slug of the picker's label
pub struct SelectionMirrorHook<S: SessionStorage> {
    key: String,
    storage: S,
}

impl<S: SessionStorage> SelectionMirrorHook<S> {
    pub fn new(label: &str, storage: S) -> Self {
        Self {
            key: slugify(label),
            storage,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: SessionStorage> StateHook for SelectionMirrorHook<S> {
    fn on_state_changed(&self, change: &StateChange) -> Result<()> {
        let Some(selected) = change.current.selected_date else {
            return Ok(());
        };
        if !change.selection_changed() {
            return Ok(());
        }

        self.storage
            .set_item(&self.key, &format_long(selected))
            .with_context(|| format!("Failed to mirror selection for '{}'", self.key))?;

        log::info!("Mirrored selection {} under '{}'", selected, self.key);
        Ok(())
    }

    fn name(&self) -> &str {
        "Selection Mirror"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalendarStore;
    use crate::infrastructure::test_utils::test_harness::TestSession;
    use crate::infrastructure::{MemorySessionStorage, read_selection};
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn mirrored(storage: &Rc<MemorySessionStorage>) -> CalendarStore {
        let mut store = CalendarStore::new(date(2024, 3, 5));
        store
            .hooks_mut()
            .register(SelectionMirrorHook::new("Date of Birth", storage.clone()));
        store
    }

    #[test]
    fn test_key_is_label_slug() {
        let hook = SelectionMirrorHook::new(" Date of Birth ", MemorySessionStorage::new());
        assert_eq!(hook.key(), "date-of-birth");
    }

    #[test]
    fn test_nothing_mirrored_without_selection() {
        let storage = Rc::new(MemorySessionStorage::new());
        let mut store = mirrored(&storage);

        store.open();
        store.show_next_month().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_latest_selection_replaces_previous() {
        let storage = Rc::new(MemorySessionStorage::new());
        let mut store = mirrored(&storage);

        store.set_selected_date(date(2024, 3, 5));
        assert_eq!(
            storage.get_item("date-of-birth").unwrap(),
            Some("Tue Mar 05 2024".to_string())
        );

        store.set_selected_date(date(1990, 7, 14));
        assert_eq!(
            storage.get_item("date-of-birth").unwrap(),
            Some("Sat Jul 14 1990".to_string())
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_mirroring_recovers_from_foreign_session_file() {
        let session = TestSession::new();
        std::fs::write(session.path(), "[]").unwrap();

        let mut store = session.mirrored_store("Due", date(2024, 3, 1));
        store.set_selected_date(date(2024, 3, 5));

        assert_eq!(
            read_selection(&session.storage(), "Due").unwrap(),
            Some(date(2024, 3, 5))
        );
    }
}
