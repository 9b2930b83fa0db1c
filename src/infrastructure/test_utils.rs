/// Test utilities for file-backed session storage
///
/// Each test gets its own temporary directory holding the session file. The
/// directory is removed when the harness is dropped.
///
/// ## Usage Examples
///
/// ```rust
/// use crate::infrastructure::test_utils::test_harness::TestSession;
///
/// #[test]
/// fn my_test() {
///     let session = TestSession::new();
///     let storage = session.storage();
///
///     // Use storage for testing...
/// }
///
/// // Or using the functional approach:
/// #[test]
/// fn my_test() {
///     test_harness::with_test_session(|session| {
///         // Use session here...
///     });
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::CalendarStore;
    use crate::infrastructure::{FileSessionStorage, HookRegistry, SelectionMirrorHook};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub struct TestSession {
        storage: FileSessionStorage,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TestSession {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let storage = FileSessionStorage::new(temp_dir.path().join("session.json"));

            Self {
                storage,
                _temp_dir: temp_dir,
            }
        }

        pub fn storage(&self) -> FileSessionStorage {
            self.storage.clone()
        }

        pub fn path(&self) -> PathBuf {
            self.storage.path().to_path_buf()
        }

        /// Store for a picker labelled `label` that mirrors into this session
        pub fn mirrored_store(&self, label: &str, today: NaiveDate) -> CalendarStore {
            let mut hooks = HookRegistry::new();
            hooks.register(SelectionMirrorHook::new(label, self.storage()));
            CalendarStore::with_hooks(today, hooks)
        }
    }

    /// Run a test with a fresh session file
    pub fn with_test_session<F, R>(test_fn: F) -> R
    where
        F: FnOnce(&TestSession) -> R,
    {
        let session = TestSession::new();
        test_fn(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::infrastructure::read_selection;
    use chrono::NaiveDate;

    #[test]
    fn test_harness_basic_functionality() {
        let session = TestSession::new();
        assert!(!session.path().exists());

        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut store = session.mirrored_store("Start Date", today);
        store.set_selected_date(today);

        assert!(session.path().exists());
        assert_eq!(
            read_selection(&session.storage(), "Start Date").unwrap(),
            Some(today)
        );
    }

    #[test]
    fn test_harness_with_function() {
        with_test_session(|session| {
            let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let mut store = session.mirrored_store("Due", today);
            store.toggle_visibility();
            // Nothing selected yet, nothing mirrored
            assert!(!session.path().exists());
        });
    }
}
