use crate::application::Theme;
use crate::domain::DEFAULT_YEAR_WINDOW;
use std::path::PathBuf;

pub const DEFAULT_LABEL: &str = "Date of Birth";

#[derive(Debug, Clone)]
pub struct Config {
    pub label: String,
    pub year_window: u32,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
    pub theme: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let label = lookup("DATEPICK_LABEL")
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());

        let year_window = match lookup("DATEPICK_YEAR_WINDOW") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(years) if years > 0 => years,
                _ => {
                    log::warn!(
                        "Ignoring DATEPICK_YEAR_WINDOW={raw:?}, using {DEFAULT_YEAR_WINDOW}"
                    );
                    DEFAULT_YEAR_WINDOW
                }
            },
            None => DEFAULT_YEAR_WINDOW,
        };

        let session_file = lookup("DATEPICK_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::cache_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("datepick")
                    .join("session.json")
            });

        let log_dir = lookup("DATEPICK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("datepick")
            });

        let theme = match lookup("DATEPICK_THEME") {
            Some(name) if Theme::available_themes().contains(&name.to_lowercase()) => name,
            Some(name) => {
                log::warn!(
                    "Unknown DATEPICK_THEME={name:?}, expected one of {:?}",
                    Theme::available_themes()
                );
                "dark".to_string()
            }
            None => "dark".to_string(),
        };

        Self {
            label,
            year_window,
            session_file,
            log_dir,
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.label, "Date of Birth");
        assert_eq!(config.year_window, 80);
        assert_eq!(config.theme, "dark");
        assert!(config.session_file.ends_with("datepick/session.json"));
        assert!(config.log_dir.ends_with("datepick"));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("DATEPICK_LABEL", "Start Date"),
            ("DATEPICK_YEAR_WINDOW", "10"),
            ("DATEPICK_SESSION_FILE", "/tmp/s.json"),
            ("DATEPICK_LOG_DIR", "/tmp/logs"),
            ("DATEPICK_THEME", "light"),
        ]);
        assert_eq!(config.label, "Start Date");
        assert_eq!(config.year_window, 10);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_with(&[("DATEPICK_YEAR_WINDOW", "lots"), ("DATEPICK_LABEL", "  ")]);
        assert_eq!(config.year_window, 80);
        assert_eq!(config.label, "Date of Birth");

        let config = config_with(&[("DATEPICK_YEAR_WINDOW", "0")]);
        assert_eq!(config.year_window, 80);

        let config = config_with(&[("DATEPICK_THEME", "solarized")]);
        assert_eq!(config.theme, "dark");
        let config = config_with(&[("DATEPICK_THEME", "Minimal")]);
        assert_eq!(config.theme, "Minimal");
    }
}
