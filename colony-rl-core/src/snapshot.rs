//! Snapshot persistence for pheromone tables

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{ColonyError, Result};
use crate::metrics::MetricsSnapshot;
use crate::table::PheromoneTable;

/// Key under which the pheromone table lives inside its namespace
const PHEROMONES_KEY: &str = "pheromones";

/// Key under which metrics snapshots live inside the namespace
const METRICS_KEY: &str = "metrics";

/// Load/save contract a pheromone store persists through
///
/// Implementations may put the table anywhere: a file, a database
/// row, another process. The store treats `load` failures as
/// recoverable (it degrades to an empty table) and passes `save`
/// failures to the caller without touching in-memory state.
pub trait SnapshotStore {
    /// Read the last saved table
    ///
    /// A backend with no snapshot yet returns an empty table; only an
    /// actual failure to read or decode is an error.
    fn load(&mut self) -> Result<PheromoneTable>;

    /// Persist the current table
    fn save(&mut self, table: &PheromoneTable) -> Result<()>;
}

/// Snapshot store backed by a shared JSON document on disk
///
/// The table occupies `doc[namespace]["pheromones"]`; every other key
/// in the document belongs to some other subsystem and survives saves
/// untouched. Writes go through a sibling temp file and a rename so a
/// crash mid-write leaves the previous snapshot readable.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
    namespace: String,
}

impl JsonDocumentStore {
    /// Namespace used when none is given
    pub const DEFAULT_NAMESPACE: &'static str = "colony_rl";

    /// Create a store writing to `path` under the default namespace
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_namespace(path, Self::DEFAULT_NAMESPACE)
    }

    /// Create a store writing to `path` under a custom namespace
    pub fn with_namespace(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }

    /// Path of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a metrics snapshot under `doc[namespace]["metrics"]`
    pub fn save_metrics(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        let mut doc = self.read_document_or_empty();
        insert_namespaced(
            &mut doc,
            &self.namespace,
            METRICS_KEY,
            serde_json::to_value(snapshot)?,
        );
        self.write_document(&doc)
    }

    /// Parse the whole document; a missing file is an empty document
    fn read_document(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(err) => return Err(err.into()),
        };
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ColonyError::PersistenceUnavailable(format!(
                "snapshot document at {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Like `read_document`, but an unreadable document is replaced
    /// by a fresh one so saves can proceed after corruption
    fn read_document_or_empty(&self) -> Map<String, Value> {
        match self.read_document() {
            Ok(doc) => doc,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "snapshot document unreadable; starting a fresh one"
                );
                Map::new()
            }
        }
    }

    fn write_document(&self, doc: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SnapshotStore for JsonDocumentStore {
    fn load(&mut self) -> Result<PheromoneTable> {
        let mut doc = self.read_document()?;
        let table = doc
            .get_mut(&self.namespace)
            .and_then(Value::as_object_mut)
            .and_then(|section| section.remove(PHEROMONES_KEY));
        match table {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(PheromoneTable::default()),
        }
    }

    fn save(&mut self, table: &PheromoneTable) -> Result<()> {
        let mut doc = self.read_document_or_empty();
        insert_namespaced(
            &mut doc,
            &self.namespace,
            PHEROMONES_KEY,
            serde_json::to_value(table)?,
        );
        self.write_document(&doc)
    }
}

/// Write `value` at `doc[namespace][key]`, materializing the
/// namespace object on demand and reclaiming it if a foreign writer
/// left a non-object there
fn insert_namespaced(doc: &mut Map<String, Value>, namespace: &str, key: &str, value: Value) {
    let section = doc
        .entry(namespace.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(map) = section {
        map.insert(key.to_string(), value);
    } else {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        *section = Value::Object(map);
    }
}

/// Shared-handle in-memory snapshot store
///
/// Cloning shares the same underlying slot, so a test can keep one
/// handle while the pheromone store owns the other and assert on what
/// was saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slot: Arc<Mutex<PheromoneTable>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a table
    #[must_use]
    pub fn with_table(table: PheromoneTable) -> Self {
        Self {
            slot: Arc::new(Mutex::new(table)),
        }
    }

    /// Copy of the last saved table
    pub fn saved(&self) -> Result<PheromoneTable> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, PheromoneTable>> {
        self.slot
            .lock()
            .map_err(|_| ColonyError::PersistenceUnavailable("snapshot slot poisoned".into()))
    }
}

impl SnapshotStore for InMemoryStore {
    fn load(&mut self) -> Result<PheromoneTable> {
        Ok(self.lock()?.clone())
    }

    fn save(&mut self, table: &PheromoneTable) -> Result<()> {
        *self.lock()? = table.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::LearningMetrics;

    fn temp_store(name: &str) -> (PathBuf, JsonDocumentStore) {
        let dir = std::env::temp_dir().join(name);
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("memory.json");
        (dir, JsonDocumentStore::new(path))
    }

    fn sample_table() -> PheromoneTable {
        let mut table = PheromoneTable::new();
        table.insert("nest", "forage", 0.42);
        table.insert("nest", "guard", 0.1);
        table.insert("trail", "follow", 1.7);
        table
    }

    #[test]
    fn save_then_load_round_trips() {
        let (dir, mut store) = temp_store("colony_snapshot_round_trip");
        let table = sample_table();
        store.save(&table).unwrap();
        assert_eq!(store.load().unwrap(), table);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_file_loads_empty_table() {
        let (dir, mut store) = temp_store("colony_snapshot_missing");
        assert!(store.load().unwrap().is_empty());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn corrupt_document_fails_to_load() {
        let (dir, mut store) = temp_store("colony_snapshot_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_err());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn save_replaces_corrupt_document() {
        let (dir, mut store) = temp_store("colony_snapshot_recover");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        store.save(&sample_table()).unwrap();
        assert_eq!(store.load().unwrap(), sample_table());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn foreign_document_keys_survive_saves() {
        let (dir, mut store) = temp_store("colony_snapshot_foreign_keys");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            store.path(),
            r#"{"journal": ["boot"], "colony_rl": {"metrics": {"cycles": 3}}}"#,
        )
        .unwrap();

        store.save(&sample_table()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["journal"][0], "boot");
        assert_eq!(doc["colony_rl"]["metrics"]["cycles"], 3);
        assert_eq!(doc["colony_rl"]["pheromones"]["nest"]["forage"], 0.42);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (dir, mut store) = temp_store("colony_snapshot_tmp");
        store.save(&sample_table()).unwrap();
        let names: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("memory.json")]);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn custom_namespace_keeps_stores_apart() {
        let (dir, _) = temp_store("colony_snapshot_namespaces");
        let path = dir.join("memory.json");
        let mut ours = JsonDocumentStore::with_namespace(&path, "alpha");
        let mut theirs = JsonDocumentStore::with_namespace(&path, "beta");

        ours.save(&sample_table()).unwrap();
        assert!(theirs.load().unwrap().is_empty());
        assert_eq!(ours.load().unwrap(), sample_table());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn metrics_snapshot_lands_in_namespace() {
        let (dir, store) = temp_store("colony_snapshot_metrics");
        let mut metrics = LearningMetrics::new();
        metrics.record_cycle(2.5);
        store.save_metrics(&metrics.snapshot()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["colony_rl"]["metrics"]["cycles"], 1);
        assert_eq!(doc["colony_rl"]["metrics"]["history"][0], 2.5);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn in_memory_store_shares_saves_across_handles() {
        let handle = InMemoryStore::new();
        let mut store = handle.clone();
        store.save(&sample_table()).unwrap();
        assert_eq!(handle.saved().unwrap(), sample_table());
        assert_eq!(store.load().unwrap(), sample_table());
    }
}
