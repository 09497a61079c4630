use std::path::Path;
use std::sync::Mutex;

use ntd_storage::{KeyValueStorage, Result, StorageError};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Durable key/value storage in a single SQLite file.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::backend)?;
        }
        let conn = Connection::open(db_path).map_err(StorageError::backend)?;
        debug!(path = %db_path.display(), "opened session db");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().map_err(StorageError::backend)?)
    }

    fn init(conn: Connection) -> Result<Self> {
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql).map_err(StorageError::backend)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock()?;
        conn.query_row("SELECT value FROM local_storage WHERE key=?1", params![key], |r| r.get::<_, String>(0))
            .optional()
            .map_err(StorageError::backend)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock()?;
        conn.execute(
            "INSERT INTO local_storage(key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, value, now_unix()],
        )
        .map_err(StorageError::backend)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock()?;
        conn.execute("DELETE FROM local_storage WHERE key=?1", params![key])
            .map_err(StorageError::backend)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn
            .prepare("SELECT key FROM local_storage ORDER BY key")
            .map_err(StorageError::backend)?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0)).map_err(StorageError::backend)?;
        let mut keys = vec![];
        for row in rows {
            keys.push(row.map_err(StorageError::backend)?);
        }
        Ok(keys)
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn.lock()?;
        conn.execute("DELETE FROM local_storage", []).map_err(StorageError::backend)?;
        Ok(())
    }
}

pub fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
