use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const SESSION_KEY: &str = "palette.session";
pub const LIBRARY_KEY: &str = "palette.library";
pub const HANDOFF_KEY: &str = "palette.handoff";

/// A persisted value that didn't decode into the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{key}: invalid JSON: {source}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{key}: {reason}")]
    Shape { key: &'static str, reason: String },
}

/// Decode a raw JSON record stored under `key`.
pub fn parse_record<T: DeserializeOwned>(key: &'static str, raw: &str) -> Result<T, RecordError> {
    serde_json::from_str(raw).map_err(|source| RecordError::Json { key, source })
}

/// Client-local key/value store backed by SQLite. Values are JSON text.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS kv (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |row| row.get(0))
            .optional()
            .with_context(|| format!("read {key}"))
    }

    pub fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn
            .execute(
                r#"
INSERT INTO kv(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now_unix()],
            )
            .with_context(|| format!("write {key}"))?;
        Ok(())
    }

    /// Read and delete `key` in one transaction. A second call returns `None`.
    pub fn take(&self, key: &str) -> anyhow::Result<Option<String>> {
        let tx = self
            .conn
            .unchecked_transaction()
            .with_context(|| format!("begin take {key}"))?;
        let value: Option<String> = tx
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |row| row.get(0))
            .optional()
            .with_context(|| format!("read {key}"))?;
        if value.is_some() {
            tx.execute("DELETE FROM kv WHERE key=?1", params![key])
                .with_context(|| format!("delete {key}"))?;
        }
        tx.commit().with_context(|| format!("commit take {key}"))?;
        Ok(value)
    }

    /// Serialize `value` and store it under `key`.
    pub fn put_json<T: serde::Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).with_context(|| format!("serialize {key}"))?;
        self.put(key, &raw)
    }
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
