use crate::config::Config;
use crate::error::{HotelError, Result};
use crate::paths::{self, KEY_ADMIN_RESERVATIONS, KEY_CLIENTS, KEY_ROOMS, KEY_WEB_REQUESTS};
use crate::record::{AdminReservation, Client, Room, WebRequest};
use crate::store::{FileStore, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Records read from one storage key.
///
/// A document that fails to parse yields no records and a
/// `MalformedStorageData` diagnostic instead of an error.
#[derive(Debug)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub issue: Option<HotelError>,
}

impl<T> Collection<T> {
    fn clean(records: Vec<T>) -> Self {
        Self {
            records,
            issue: None,
        }
    }

    fn malformed(key: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(key = %key, reason = %reason, "malformed storage data, treating as empty");
        Self {
            records: Vec::new(),
            issue: Some(HotelError::MalformedStorageData {
                key: key.to_string(),
                reason,
            }),
        }
    }
}

/// Read a JSON array stored under `key`.
///
/// Absent key: empty. Invalid JSON or a non-array document: empty plus a
/// logged diagnostic. Array elements that are not objects are skipped.
/// Only storage I/O failures are returned as errors.
pub fn read_collection<T, S>(store: &S, key: &str) -> Result<Collection<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = fetch(store, key)? else {
        return Ok(Collection::clean(Vec::new()));
    };
    let items = match raw.and_then(|raw| parse_array(&raw)) {
        Ok(items) => items,
        Err(reason) => return Ok(Collection::malformed(key, reason)),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            tracing::warn!(key = %key, index, "skipping non-object entry");
            continue;
        }
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(key = %key, index, error = %e, "skipping unreadable entry"),
        }
    }
    Ok(Collection::clean(records))
}

/// Fetch the document under `key`. A document that is not valid UTF-8 comes
/// back as `Some(Err(reason))` so callers handle it like unparseable JSON.
fn fetch<S>(store: &S, key: &str) -> Result<Option<std::result::Result<String, String>>>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(raw) => Ok(raw.map(Ok)),
        Err(HotelError::Io(e)) if e.kind() == ErrorKind::InvalidData => Ok(Some(Err(e.to_string()))),
        Err(e) => Err(e),
    }
}

fn parse_array(raw: &str) -> std::result::Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(format!("expected a JSON array, found {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Typed access to the four hotel collections on top of a key-value store.
#[derive(Debug)]
pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn admin_reservations(&self) -> Result<Collection<AdminReservation>> {
        read_collection(&self.store, KEY_ADMIN_RESERVATIONS)
    }

    pub fn web_requests(&self) -> Result<Collection<WebRequest>> {
        read_collection(&self.store, KEY_WEB_REQUESTS)
    }

    pub fn rooms(&self) -> Result<Collection<Room>> {
        read_collection(&self.store, KEY_ROOMS)
    }

    pub fn clients(&self) -> Result<Collection<Client>> {
        read_collection(&self.store, KEY_CLIENTS)
    }

    pub fn append_web_request(&self, request: &WebRequest) -> Result<()> {
        self.append(KEY_WEB_REQUESTS, request)
    }

    pub fn append_admin_reservation(&self, reservation: &AdminReservation) -> Result<()> {
        self.append(KEY_ADMIN_RESERVATIONS, reservation)
    }

    pub fn append_room(&self, room: &Room) -> Result<()> {
        self.append(KEY_ROOMS, room)
    }

    pub fn append_client(&self, client: &Client) -> Result<()> {
        self.append(KEY_CLIENTS, client)
    }

    /// Push one record onto the array under `key`, keeping every existing
    /// element verbatim. A malformed document is replaced by a fresh array.
    pub fn append<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let mut items = match fetch(&self.store, key)? {
            None => Vec::new(),
            Some(raw) => raw.and_then(|raw| parse_array(&raw)).unwrap_or_else(|reason| {
                tracing::warn!(key = %key, reason = %reason, "replacing malformed storage data");
                Vec::new()
            }),
        };
        items.push(serde_json::to_value(record)?);
        let data = serde_json::to_string_pretty(&Value::Array(items))?;
        self.store.set(key, &data)
    }

    /// Write `[]` under every hotel key that has never been written.
    /// Returns the keys that were created.
    pub fn ensure_initialized(&self) -> Result<Vec<&'static str>> {
        let mut created = Vec::new();
        for key in paths::ALL_KEYS {
            if fetch(&self.store, key)?.is_none() {
                self.store.set(key, "[]")?;
                created.push(key);
            }
        }
        Ok(created)
    }
}

impl Repository<FileStore> {
    /// Open the file-backed collections configured for `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Ok(Self::new(FileStore::new(config.storage_dir(root))))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StayRecord;
    use crate::store::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn absent_key_is_empty_without_issue() {
        let repo = Repository::new(MemoryStore::new());
        let c = repo.web_requests().unwrap();
        assert!(c.records.is_empty());
        assert!(c.issue.is_none());
    }

    #[test]
    fn invalid_json_is_empty_with_issue() {
        let repo = Repository::new(MemoryStore::new().with_entry(KEY_WEB_REQUESTS, "{not json"));
        let c = repo.web_requests().unwrap();
        assert!(c.records.is_empty());
        match c.issue {
            Some(HotelError::MalformedStorageData { key, .. }) => assert_eq!(key, KEY_WEB_REQUESTS),
            other => panic!("expected MalformedStorageData, got {other:?}"),
        }
    }

    #[test]
    fn non_array_document_is_malformed() {
        let repo = Repository::new(MemoryStore::new().with_entry(KEY_ROOMS, r#"{"a":1}"#));
        let c = repo.rooms().unwrap();
        assert!(c.records.is_empty());
        assert!(c.issue.is_some());
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let repo = Repository::new(MemoryStore::new().with_entry(
            KEY_ADMIN_RESERVATIONS,
            r#"[1, null, {"cedula":"1234567890"}, "x"]"#,
        ));
        let c = repo.admin_reservations().unwrap();
        assert_eq!(c.records.len(), 1);
        assert!(c.issue.is_none());
    }

    #[test]
    fn append_preserves_existing_entries() {
        let repo = Repository::new(
            MemoryStore::new().with_entry(KEY_WEB_REQUESTS, r#"[{"nombre":"Ana","x":1}, 42]"#),
        );
        let req = WebRequest(StayRecord {
            nombre: Some("Luis".into()),
            ..Default::default()
        });
        repo.append_web_request(&req).unwrap();

        let raw = repo.store().get(KEY_WEB_REQUESTS).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["x"], 1);
        assert_eq!(items[1], 42);
        assert_eq!(items[2]["nombre"], "Luis");
    }

    #[test]
    fn append_replaces_malformed_document() {
        let repo = Repository::new(MemoryStore::new().with_entry(KEY_CLIENTS, "oops"));
        repo.append_client(&Client {
            nombre: Some("Ana".into()),
            ..Default::default()
        })
        .unwrap();
        let c = repo.clients().unwrap();
        assert_eq!(c.records.len(), 1);
        assert!(c.issue.is_none());
    }

    #[test]
    fn non_utf8_file_is_empty_with_issue() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("solicitudes.json"), [0xff, 0xfe, b'[', b']']).unwrap();
        let repo = Repository::new(FileStore::new(dir.path()));

        let c = repo.web_requests().unwrap();
        assert!(c.records.is_empty());
        assert!(matches!(c.issue, Some(HotelError::MalformedStorageData { .. })));

        repo.append_web_request(&WebRequest::default()).unwrap();
        assert_eq!(repo.web_requests().unwrap().records.len(), 1);
    }

    #[test]
    fn open_requires_config() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Repository::open(dir.path()),
            Err(HotelError::NotInitialized)
        ));
        Config::new("Hotel ULEAM").save(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.store().dir(), dir.path().join(".hotel/storage"));
    }

    #[test]
    fn ensure_initialized_only_creates_missing_keys() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(FileStore::new(dir.path()));
        repo.store().set(KEY_ROOMS, r#"[{"numero":"101"}]"#).unwrap();

        let created = repo.ensure_initialized().unwrap();
        assert_eq!(created.len(), 3);
        assert!(!created.contains(&KEY_ROOMS));
        assert_eq!(repo.rooms().unwrap().records.len(), 1);

        assert!(repo.ensure_initialized().unwrap().is_empty());
    }
}
