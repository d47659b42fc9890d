//! Pipeline settings and the calboard config file.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CalboardError, CalboardResult};
use crate::instant::lookup_timezone;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
pub const DEFAULT_WINDOW_DAYS: i64 = 45;
pub const DEFAULT_MAX_EVENTS: usize = 30;

/// Everything the pipeline needs besides the text and the current time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgendaConfig {
    /// Zone for floating times, date-only values and day labels.
    pub timezone: Tz,
    pub window_days: i64,
    pub max_events: usize,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            timezone: DEFAULT_TIMEZONE,
            window_days: DEFAULT_WINDOW_DAYS,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

/// Configuration at ~/.config/calboard/config.toml
///
/// Every key is optional; missing keys take the `AgendaConfig` defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CalboardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_days: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_events: Option<usize>,
}

impl CalboardConfig {
    pub fn config_path() -> CalboardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                CalboardError::InvalidConfig("Could not determine config directory".into())
            })?
            .join("calboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config at `path`, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> CalboardResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(CalboardConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CalboardError::Serialization(format!("Could not parse {}: {}", path.display(), e))
        })
    }

    /// Validate into the settings the pipeline runs with.
    pub fn agenda_config(&self) -> CalboardResult<AgendaConfig> {
        let timezone = match &self.timezone {
            Some(name) => {
                lookup_timezone(name).ok_or_else(|| CalboardError::InvalidTimezone(name.clone()))?
            }
            None => DEFAULT_TIMEZONE,
        };

        let window_days = self.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days <= 0 {
            return Err(CalboardError::InvalidConfig(format!(
                "window_days must be positive, got {window_days}"
            )));
        }

        Ok(AgendaConfig {
            timezone,
            window_days,
            max_events: self.max_events.unwrap_or(DEFAULT_MAX_EVENTS),
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalboardResult<()> {
        let contents = format!(
            "\
# calboard configuration

# Timezone for all-day and floating event times, and for day headings:
# timezone = \"{}\"

# How many days ahead to show:
# window_days = {}

# Maximum number of events to show:
# max_events = {}
",
            DEFAULT_TIMEZONE.name(),
            DEFAULT_WINDOW_DAYS,
            DEFAULT_MAX_EVENTS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalboardError::InvalidConfig(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            CalboardError::InvalidConfig(format!("Could not write config file: {e}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CalboardConfig = toml::from_str("").unwrap();

        assert_eq!(config.agenda_config().unwrap(), AgendaConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config: CalboardConfig = toml::from_str(
            "timezone = \"Europe/Berlin\"\nwindow_days = 7\nmax_events = 5\n",
        )
        .unwrap();

        let agenda = config.agenda_config().unwrap();

        assert_eq!(agenda.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(agenda.window_days, 7);
        assert_eq!(agenda.max_events, 5);
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let config = CalboardConfig {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            config.agenda_config(),
            Err(CalboardError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_non_positive_window_is_rejected() {
        let config = CalboardConfig {
            window_days: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            config.agenda_config(),
            Err(CalboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_config_template_parses_to_defaults() {
        let path = std::env::temp_dir()
            .join(format!("calboard-test-{}", std::process::id()))
            .join("config.toml");

        CalboardConfig::create_default_config(&path).unwrap();
        let loaded = CalboardConfig::load_from(&path).unwrap();

        assert_eq!(loaded, CalboardConfig::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = Path::new("/nonexistent/calboard/config.toml");

        assert_eq!(
            CalboardConfig::load_from(path).unwrap(),
            CalboardConfig::default()
        );
    }
}
