use crate::error::{HotelError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const HOTEL_DIR: &str = ".hotel";
pub const STORAGE_DIR: &str = ".hotel/storage";
pub const CONFIG_FILE: &str = ".hotel/config.yaml";

pub const STORAGE_EXT: &str = "json";

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

pub const KEY_ADMIN_RESERVATIONS: &str = "reservasAdmin";
pub const KEY_WEB_REQUESTS: &str = "solicitudes";
pub const KEY_ROOMS: &str = "habitaciones";
pub const KEY_CLIENTS: &str = "clientes";

pub const ALL_KEYS: [&str; 4] = [
    KEY_ADMIN_RESERVATIONS,
    KEY_WEB_REQUESTS,
    KEY_ROOMS,
    KEY_CLIENTS,
];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn hotel_dir(root: &Path) -> PathBuf {
    root.join(HOTEL_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn key_path(storage_dir: &Path, key: &str) -> Result<PathBuf> {
    validate_key(key)?;
    Ok(storage_dir.join(format!("{key}.{STORAGE_EXT}")))
}

// ---------------------------------------------------------------------------
// Key validation
// ---------------------------------------------------------------------------

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap())
}

/// Storage keys become file names, so anything that could escape the
/// storage directory is refused.
pub fn validate_key(key: &str) -> Result<()> {
    if key.len() > 64 || !key_re().is_match(key) {
        return Err(HotelError::InvalidKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_valid() {
        for key in ALL_KEYS {
            validate_key(key).unwrap_or_else(|_| panic!("expected valid: {key}"));
        }
    }

    #[test]
    fn invalid_keys() {
        for key in ["", "../etc", "a/b", "with space", "dot.json"] {
            assert!(validate_key(key).is_err(), "expected invalid: {key}");
        }
    }

    #[test]
    fn key_path_appends_extension() {
        let p = key_path(Path::new("/tmp/store"), "solicitudes").unwrap();
        assert_eq!(p, Path::new("/tmp/store/solicitudes.json"));
    }
}
