//! Dashboard settings: JSON file under the XDG config dir, overridable from the CLI.
//! Stored at $XDG_CONFIG_HOME/tempdash/config.json (fallback ~/.config/tempdash/config.json)

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::error::{DashError, Result};
use crate::window::WINDOW_CEILING;

pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_MAX_WINDOW_SIZE: usize = 30;
pub const DEFAULT_INTERVAL_SECS: u64 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Readings retained and displayed.
    pub window_size: usize,
    /// Upper bound for `window_size`, including runtime resizes.
    pub max_window_size: usize,
    pub update_interval_secs: u64,
    pub value_min: f64,
    pub value_max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_window_size: DEFAULT_MAX_WINDOW_SIZE,
            update_interval_secs: DEFAULT_INTERVAL_SECS,
            value_min: 0.0,
            value_max: 100.0,
            seed: None,
        }
    }
}

impl DashConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_window_size == 0 || self.max_window_size > WINDOW_CEILING {
            return Err(DashError::Config(format!(
                "max_window_size must be in 1..={WINDOW_CEILING}, got {}",
                self.max_window_size
            )));
        }
        if self.window_size == 0 || self.window_size > self.max_window_size {
            return Err(DashError::InvalidCapacity {
                requested: self.window_size,
                max: self.max_window_size,
            });
        }
        if self.update_interval_secs == 0 {
            return Err(DashError::Config("update_interval_secs must be at least 1".into()));
        }
        if !self.value_min.is_finite()
            || !self.value_max.is_finite()
            || self.value_min > self.value_max
        {
            return Err(DashError::Config(format!(
                "invalid value range {}..={}",
                self.value_min, self.value_max
            )));
        }
        Ok(())
    }
}

/// Values given on the command line; `None` keeps what the file says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub update_interval_secs: Option<u64>,
    pub window_size: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut DashConfig) {
        if let Some(i) = self.update_interval_secs {
            cfg.update_interval_secs = i;
        }
        if let Some(w) = self.window_size {
            cfg.window_size = w;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("tempdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tempdash")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Missing file means defaults; a present but malformed file is an error.
pub fn load_config(path: &Path) -> Result<DashConfig> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(serde_json::from_str(&s)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}; using defaults", path.display());
            Ok(DashConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn save_config(path: &Path, cfg: &DashConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(cfg)?;
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = DashConfig::default();
        c.validate().unwrap();
        assert_eq!(c.window_size, 5);
        assert_eq!(c.max_window_size, 30);
        assert_eq!(c.interval(), Duration::from_secs(4));
    }

    #[test]
    fn window_above_max_rejected() {
        let c = DashConfig {
            window_size: 31,
            ..DashConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(DashError::InvalidCapacity { requested: 31, max: 30 })
        ));
    }

    #[test]
    fn oversized_max_window_rejected() {
        let c: DashConfig = serde_json::from_str(
            r#"{"window_size": 1000000000000, "max_window_size": 1000000000000}"#,
        )
        .unwrap();
        assert!(matches!(c.validate(), Err(DashError::Config(_))));
        let c = DashConfig {
            max_window_size: 31,
            ..DashConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn bad_interval_and_range_rejected() {
        let c = DashConfig {
            update_interval_secs: 0,
            ..DashConfig::default()
        };
        assert!(c.validate().is_err());
        let c = DashConfig {
            value_min: 50.0,
            value_max: 10.0,
            ..DashConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: DashConfig = serde_json::from_str(r#"{"window_size": 8}"#).unwrap();
        assert_eq!(c.window_size, 8);
        assert_eq!(c.max_window_size, 30);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn overrides_touch_only_given_fields() {
        let mut c = DashConfig::default();
        ConfigOverrides {
            window_size: Some(9),
            ..ConfigOverrides::default()
        }
        .apply(&mut c);
        assert_eq!(c.window_size, 9);
        assert_eq!(c.update_interval_secs, 4);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn save_then_load() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("config.json");
        assert_eq!(load_config(&path).unwrap(), DashConfig::default());

        let c = DashConfig {
            window_size: 12,
            seed: Some(3),
            ..DashConfig::default()
        };
        save_config(&path, &c).unwrap();
        assert_eq!(load_config(&path).unwrap(), c);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(DashError::Json { .. })));
    }
}
