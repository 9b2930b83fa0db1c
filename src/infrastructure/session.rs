use crate::domain::{DatePickerError, DatePickerResult, slugify};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Format of mirrored values, e.g. `Tue Mar 05 2024`.
pub const SESSION_DATE_FORMAT: &str = "%a %b %d %Y";

/// Key/value store for mirrored selections. Contents are not expected to
/// outlive the session.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> DatePickerResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> DatePickerResult<()>;
    fn remove_item(&self, key: &str) -> DatePickerResult<()>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Rc<S> {
    fn get_item(&self, key: &str) -> DatePickerResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> DatePickerResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> DatePickerResult<()> {
        (**self).remove_item(key)
    }
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> DatePickerResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DatePickerResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DatePickerResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage kept as one JSON object in a file, so that a later invocation
/// can read back the last selection.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> DatePickerResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like `load`, but a file that is not a JSON object of strings is
    /// treated as empty so the next write replaces it.
    fn load_for_write(&self) -> DatePickerResult<BTreeMap<String, String>> {
        match self.load() {
            Err(DatePickerError::Serialization(e)) => {
                log::warn!("Overwriting unreadable session file {}: {}", self.path.display(), e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn store(&self, items: &BTreeMap<String, String>) -> DatePickerResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> DatePickerResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> DatePickerResult<()> {
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.store(&items)
    }

    fn remove_item(&self, key: &str) -> DatePickerResult<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }
}

/// Reads back the selection mirrored for the picker labelled `label`.
pub fn read_selection(
    storage: &dyn SessionStorage,
    label: &str,
) -> DatePickerResult<Option<NaiveDate>> {
    let key = slugify(label);
    match storage.get_item(&key)? {
        Some(value) => NaiveDate::parse_from_str(&value, SESSION_DATE_FORMAT)
            .map(Some)
            .map_err(|e| DatePickerError::Session(format!("bad value for '{key}': {e}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::TestSession;

    #[test]
    fn test_memory_storage() {
        let storage = MemorySessionStorage::new();
        assert!(storage.is_empty());

        storage.set_item("due", "a").unwrap();
        storage.set_item("due", "b").unwrap();
        assert_eq!(storage.get_item("due").unwrap(), Some("b".to_string()));
        assert_eq!(storage.len(), 1);

        storage.remove_item("due").unwrap();
        assert_eq!(storage.get_item("due").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_between_instances() {
        let session = TestSession::new();
        let storage = session.storage();
        assert_eq!(storage.get_item("date-of-birth").unwrap(), None);

        storage.set_item("date-of-birth", "Tue Mar 05 2024").unwrap();
        storage.set_item("start-date", "Mon Jan 01 2024").unwrap();

        let reopened = FileSessionStorage::new(session.path());
        assert_eq!(
            reopened.get_item("date-of-birth").unwrap(),
            Some("Tue Mar 05 2024".to_string())
        );

        reopened.remove_item("start-date").unwrap();
        assert_eq!(storage.get_item("start-date").unwrap(), None);
        assert!(storage.get_item("date-of-birth").unwrap().is_some());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let session = TestSession::new();
        std::fs::write(session.path(), "not json").unwrap();

        assert!(matches!(
            session.storage().get_item("x"),
            Err(DatePickerError::Serialization(_))
        ));
    }

    #[test]
    fn test_file_storage_write_replaces_unreadable_file() {
        let session = TestSession::new();
        let storage = session.storage();

        for content in ["[]", "not json", r#"{"due": 3}"#] {
            std::fs::write(session.path(), content).unwrap();
            storage.set_item("due", "Tue Mar 05 2024").unwrap();
            assert_eq!(
                storage.get_item("due").unwrap(),
                Some("Tue Mar 05 2024".to_string())
            );
        }
    }

    #[test]
    fn test_read_selection() {
        let storage = MemorySessionStorage::new();
        assert_eq!(read_selection(&storage, "Date of Birth").unwrap(), None);

        storage.set_item("date-of-birth", "Tue Mar 05 2024").unwrap();
        assert_eq!(
            read_selection(&storage, " Date of Birth").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );

        storage.set_item("date-of-birth", "yesterday").unwrap();
        assert!(matches!(
            read_selection(&storage, "Date of Birth"),
            Err(DatePickerError::Session(_))
        ));
    }
}
