//! SQLite-backed key-value store.

use super::{KeyValueStore, KvResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_store` table of a migrated connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `db::open_db` or `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
