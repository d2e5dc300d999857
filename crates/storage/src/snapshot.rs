//! Snapshot directories
//!
//! A snapshot is a directory holding one `<table>.json` file per table. Each
//! file is the table's identifier → record map, pretty-printed. This is the
//! layout seed data is delivered in.
//!
//! - A missing file loads as an empty table.
//! - A row stored under a key other than its own identifier, or under a
//!   non-canonical key such as `"01"`, is `Corruption`.
//! - Unparseable JSON is a `Serialization` error naming the file.

use crate::store::{EntityStore, TableVisitor, TableVisitorMut};
use crate::table::Table;
use incidentdb_core::{Entity, IncidentError, IncidentResult, TableName};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File holding `table` inside snapshot directory `dir`.
pub fn table_path(dir: &Path, table: TableName) -> PathBuf {
    dir.join(format!("{}.json", table.as_str()))
}

struct Loader<'a> {
    dir: &'a Path,
    missing: Vec<TableName>,
}

impl TableVisitorMut for Loader<'_> {
    fn visit<E: Entity>(&mut self, table: &mut Table<E>) -> IncidentResult<()> {
        let path = table_path(self.dir, E::TABLE);
        if !path.exists() {
            warn!(
                target: "incidentdb::snapshot",
                table = %E::TABLE,
                path = %path.display(),
                "Table file missing, loading as empty"
            );
            self.missing.push(E::TABLE);
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        let keyed: BTreeMap<String, E> =
            serde_json::from_str(&content).map_err(|e| IncidentError::Serialization {
                reason: format!("{}: {}", path.display(), e),
            })?;
        let mut rows = BTreeMap::new();
        for (key, record) in keyed {
            rows.insert(canonical_id::<E>(&path, &key)?, record);
        }
        *table = Table::from_rows(rows)?;
        Ok(())
    }
}

/// Parse a table-file key. Only the form the identifier prints is accepted,
/// so `"01"` cannot alias `"1"`.
fn canonical_id<E: Entity>(path: &Path, key: &str) -> IncidentResult<E::Id> {
    let id: E::Id = key
        .parse()
        .map_err(|e| IncidentError::corruption(format!("{}: {}", path.display(), e)))?;
    if id.to_string() != key {
        return Err(IncidentError::corruption(format!(
            "{}: key '{}' is not the canonical form of {} {}",
            path.display(),
            key,
            E::TABLE.id_field(),
            id
        )));
    }
    Ok(id)
}

struct Saver<'a> {
    dir: &'a Path,
    result: IncidentResult<()>,
}

impl TableVisitor for Saver<'_> {
    fn visit<E: Entity>(&mut self, table: &Table<E>) {
        if self.result.is_err() {
            return;
        }
        self.result = write_table(self.dir, table);
    }
}

fn write_table<E: Entity>(dir: &Path, table: &Table<E>) -> IncidentResult<()> {
    let content = serde_json::to_string_pretty(table.rows())?;
    fs::write(table_path(dir, E::TABLE), content)?;
    Ok(())
}

/// Load every table from snapshot directory `dir`.
///
/// # Errors
///
/// Returns `Io` if `dir` is not a readable directory, `Serialization` if a
/// table file is malformed and `Corruption` if a row's key and identifier
/// disagree.
pub fn load_dir(dir: &Path) -> IncidentResult<EntityStore> {
    if !dir.is_dir() {
        return Err(IncidentError::Io {
            reason: format!("snapshot directory '{}' does not exist", dir.display()),
        });
    }

    let mut store = EntityStore::new();
    let mut loader = Loader {
        dir,
        missing: Vec::new(),
    };
    store.visit_mut(&mut loader)?;

    info!(
        target: "incidentdb::snapshot",
        dir = %dir.display(),
        records = store.total_records(),
        missing_tables = loader.missing.len(),
        "Loaded snapshot"
    );
    Ok(store)
}

/// Write every table of `store` into snapshot directory `dir`, creating it
/// if needed. Existing table files are overwritten.
///
/// # Errors
///
/// Returns `Io` if the directory or a file cannot be written.
pub fn save_dir(store: &EntityStore, dir: &Path) -> IncidentResult<()> {
    fs::create_dir_all(dir)?;
    let mut saver = Saver { dir, result: Ok(()) };
    store.visit(&mut saver);
    saver.result?;

    info!(
        target: "incidentdb::snapshot",
        dir = %dir.display(),
        records = store.total_records(),
        "Saved snapshot"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidentdb_core::*;
    use tempfile::TempDir;

    fn client(id: u64, reg: &str) -> Client {
        Client {
            client_id: ClientId::new(id),
            client_name: format!("Client {}", id),
            registration_number: reg.into(),
            contact_email: format!("c{}@example.test", id),
            contact_phone: None,
            client_type: ClientType::Startup,
            industry: Some("retail".into()),
            country: None,
            status: PartyStatus::Active,
            created_at: "2025-10-01T00:00:00".into(),
            updated_at: "2025-10-01T00:00:00".into(),
        }
    }

    #[test]
    fn save_then_load_is_identical() {
        let dir = TempDir::new().unwrap();
        let mut store = EntityStore::new();
        store.table_mut::<Client>().insert(client(1, "REG-1"));
        store.table_mut::<Client>().insert(client(2, "REG-2"));

        save_dir(&store, dir.path()).unwrap();
        assert!(table_path(dir.path(), TableName::Clients).exists());
        assert!(table_path(dir.path(), TableName::HumanTransfers).exists());

        let loaded = load_dir(dir.path()).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn files_are_keyed_by_string_id() {
        let dir = TempDir::new().unwrap();
        let mut store = EntityStore::new();
        store.table_mut::<Client>().insert(client(7, "REG-7"));
        save_dir(&store, dir.path()).unwrap();

        let raw = fs::read_to_string(table_path(dir.path(), TableName::Clients)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["7"]["client_id"], "7");
        assert!(raw.contains('\n'));
    }

    #[test]
    fn missing_files_load_as_empty_tables() {
        let dir = TempDir::new().unwrap();
        let store = load_dir(dir.path()).unwrap();
        assert_eq!(store.total_records(), 0);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, IncidentError::Io { .. }));
    }

    #[test]
    fn key_id_mismatch_is_corruption() {
        let dir = TempDir::new().unwrap();
        let mut rows = serde_json::Map::new();
        rows.insert(
            "1".into(),
            serde_json::to_value(client(2, "REG-2")).unwrap(),
        );
        fs::write(
            table_path(dir.path(), TableName::Clients),
            serde_json::to_string(&rows).unwrap(),
        )
        .unwrap();

        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, IncidentError::Corruption { .. }));
    }

    #[test]
    fn aliased_keys_are_corruption() {
        let dir = TempDir::new().unwrap();
        let mut rows = serde_json::Map::new();
        rows.insert("1".into(), serde_json::to_value(client(1, "REG-1")).unwrap());
        rows.insert("01".into(), serde_json::to_value(client(1, "REG-9")).unwrap());
        fs::write(
            table_path(dir.path(), TableName::Clients),
            serde_json::to_string(&rows).unwrap(),
        )
        .unwrap();

        let err = load_dir(dir.path()).unwrap_err();
        match err {
            IncidentError::Corruption { reason } => assert!(reason.contains("'01'")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_numeric_key_is_corruption() {
        let dir = TempDir::new().unwrap();
        let mut rows = serde_json::Map::new();
        rows.insert("one".into(), serde_json::to_value(client(1, "REG-1")).unwrap());
        fs::write(
            table_path(dir.path(), TableName::Clients),
            serde_json::to_string(&rows).unwrap(),
        )
        .unwrap();

        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, IncidentError::Corruption { .. }));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        fs::write(table_path(dir.path(), TableName::Users), "{ not json").unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        match err {
            IncidentError::Serialization { reason } => assert!(reason.contains("users.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
