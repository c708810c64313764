use crate::error::{HotelError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// HotelConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per storage key, relative to the root.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(paths::STORAGE_DIR)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// LookupConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Pause before showing lookup results, so the "searching" state is visible.
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,
}

fn default_search_delay_ms() -> u64 {
    500
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            search_delay_ms: default_search_delay_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub hotel: HotelConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

pub const DEFAULT_HOTEL_NAME: &str = "Hotel";

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(hotel_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            hotel: HotelConfig {
                name: hotel_name.into(),
                description: None,
            },
            storage: StorageConfig::default(),
            lookup: LookupConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(HotelError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like `load`, but a root that was never initialized gets the default
    /// layout. Read-only callers use this: absent collections read as empty.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(HotelError::NotInitialized) => Ok(Self::new(DEFAULT_HOTEL_NAME)),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Absolute storage directory for this project root.
    pub fn storage_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.storage.dir)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.hotel.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "hotel.name is empty".to_string(),
            });
        }

        let dir = &self.storage.dir;
        if dir.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "storage.dir is empty".to_string(),
            });
        } else if dir.is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "storage.dir '{}' is absolute; the project will not be relocatable",
                    dir.display()
                ),
            });
        } else if dir.components().any(|c| matches!(c, Component::ParentDir)) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("storage.dir '{}' points outside the project root", dir.display()),
            });
        }

        if self.lookup.search_delay_ms > 5000 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "lookup.search_delay_ms={} (>5000 is unusual)",
                    self.lookup.search_delay_ms
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_or_default_without_config() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(Config::load(dir.path()), Err(HotelError::NotInitialized)));

        let cfg = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.hotel.name, DEFAULT_HOTEL_NAME);
        assert_eq!(cfg.storage_dir(dir.path()), dir.path().join(".hotel/storage"));

        Config::new("Hotel ULEAM").save(dir.path()).unwrap();
        assert_eq!(Config::load_or_default(dir.path()).unwrap().hotel.name, "Hotel ULEAM");
    }

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("Hotel ULEAM");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.hotel.name, "Hotel ULEAM");
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.lookup.search_delay_ms, 500);
        assert_eq!(parsed.storage.dir, PathBuf::from(".hotel/storage"));
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let parsed: Config = serde_yaml::from_str("hotel:\n  name: Costa Azul\n").unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.lookup.search_delay_ms, 500);
        assert!(parsed.validate().is_empty());
    }

    #[test]
    fn load_without_init_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(HotelError::NotInitialized)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("Hotel ULEAM");
        cfg.lookup.search_delay_ms = 0;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.lookup.search_delay_ms, 0);
        assert_eq!(
            loaded.storage_dir(dir.path()),
            dir.path().join(".hotel/storage")
        );
    }

    #[test]
    fn validate_flags_problems() {
        let mut cfg = Config::new("  ");
        cfg.storage.dir = PathBuf::from("../shared");
        cfg.lookup.search_delay_ms = 10_000;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert_eq!(
            warnings.iter().filter(|w| w.level == WarnLevel::Error).count(),
            1
        );
    }
}
