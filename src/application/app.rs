use crate::application::{Config, PickerController, PickerOutcome, PickerView, Theme};
use crate::domain::{CalendarStore, DayCell, build_month_grid, build_month_grid_for};
use crate::infrastructure::{
    FileSessionStorage, HookRegistry, SelectionLoggerHook, SelectionMirrorHook, read_selection,
};
use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};

pub struct DatePickerApp {
    config: Config,
    plugins: bool,
}

impl DatePickerApp {
    pub fn new() -> Self {
        Self::with_default_plugins(Config::from_env())
    }

    pub fn with_default_plugins(config: Config) -> Self {
        Self {
            config,
            plugins: true,
        }
    }

    pub fn without_plugins(config: Config) -> Self {
        Self {
            config,
            plugins: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_storage(&self) -> FileSessionStorage {
        FileSessionStorage::new(self.config.session_file.clone())
    }

    /// One store per mounted picker, with the default plugins registered
    pub fn create_store(&self, label: &str, today: NaiveDate) -> CalendarStore {
        let mut hooks = HookRegistry::new();
        if self.plugins {
            hooks.register(SelectionLoggerHook);
            hooks.register(SelectionMirrorHook::new(label, self.session_storage()));
        }
        log::debug!("Store for '{}' with hooks {:?}", label, hooks.list_hooks());
        CalendarStore::with_hooks(today, hooks)
    }

    /// Runs the interactive picker. Returns the confirmed date, or `None`
    /// when the user quit.
    pub fn pick(
        &self,
        label: Option<&str>,
        initial: Option<NaiveDate>,
    ) -> anyhow::Result<Option<NaiveDate>> {
        let label = label.unwrap_or(self.config.label.as_str());
        let today = Local::now().date_naive();
        log::info!("Starting picker '{}' on {}", label, today);

        let store = self.create_store(label, today);
        let mut controller = PickerController::new(label, store, self.config.year_window);
        if let Some(date) = initial {
            controller.show(date);
        }

        let mut view = PickerView::new(Theme::by_name(&self.config.theme))
            .context("Failed to start the terminal picker")?;

        match view.run(&mut controller)? {
            PickerOutcome::Confirmed(date) => {
                log::info!("Confirmed {}", date);
                Ok(Some(date))
            }
            PickerOutcome::Cancelled | PickerOutcome::Running => Ok(None),
        }
    }

    /// Grid of `month` (year, 1-12), or of the current month
    pub fn month_grid(&self, month: Option<(i32, u32)>) -> anyhow::Result<Vec<DayCell>> {
        let today = Local::now().date_naive();
        match month {
            Some((year, month)) => Ok(build_month_grid_for(year, month, today)?),
            None => Ok(build_month_grid(today, today)),
        }
    }

    /// Selection last mirrored for `label`
    pub fn last_selection(&self, label: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
        let label = label.unwrap_or(self.config.label.as_str());
        let storage = self.session_storage();
        read_selection(&storage, label)
            .with_context(|| format!("Failed to read {}", storage.path().display()))
    }
}

impl Default for DatePickerApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `YYYY-MM` into (year, month)
pub fn parse_year_month(raw: &str) -> anyhow::Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", raw))?;
    Ok((first.year(), first.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::TestSession;
    use std::path::PathBuf;

    fn config_for(session: &TestSession) -> Config {
        Config {
            label: "Date of Birth".to_string(),
            year_window: 80,
            session_file: session.path(),
            log_dir: PathBuf::from("."),
            theme: "dark".to_string(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_store_mirrors_into_configured_session_file() {
        let session = TestSession::new();
        let app = DatePickerApp::with_default_plugins(config_for(&session));

        let mut store = app.create_store("Start Date", date(2024, 3, 5));
        store.set_selected_date(date(2024, 4, 1));

        assert_eq!(app.last_selection(Some("Start Date")).unwrap(), Some(date(2024, 4, 1)));
        assert_eq!(app.last_selection(None).unwrap(), None);
    }

    #[test]
    fn test_store_without_plugins_mirrors_nothing() {
        let session = TestSession::new();
        let app = DatePickerApp::without_plugins(config_for(&session));

        let mut store = app.create_store("Date of Birth", date(2024, 3, 5));
        store.set_selected_date(date(2024, 4, 1));

        assert!(!session.path().exists());
        assert_eq!(app.last_selection(None).unwrap(), None);
    }

    #[test]
    fn test_month_grid_for_explicit_month() {
        let session = TestSession::new();
        let app = DatePickerApp::without_plugins(config_for(&session));

        let grid = app.month_grid(Some((2023, 2))).unwrap();
        assert_eq!(grid.iter().filter(|c| !c.is_blank()).count(), 28);
        assert!(app.month_grid(Some((2023, 13))).is_err());
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2024-02").unwrap(), (2024, 2));
        assert_eq!(parse_year_month(" 1999-12 ").unwrap(), (1999, 12));
        assert!(parse_year_month("2024-13").is_err());
        assert!(parse_year_month("February").is_err());
    }
}
