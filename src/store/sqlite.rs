use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Transaction};
use rusqlite_migration::{Migrations, M};

use crate::app::{Result, TributaryError};
use crate::store::KvStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations.to_latest(&mut conn)?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            TributaryError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn require_namespace(tx: &Transaction<'_>, namespace: &[u8]) -> Result<()> {
        let found = tx
            .query_row(
                "SELECT 1 FROM namespaces WHERE name = ?1",
                params![namespace],
                |_| Ok(()),
            )
            .optional()?;

        found.ok_or_else(|| {
            TributaryError::NamespaceNotFound(String::from_utf8_lossy(namespace).into_owned())
        })
    }
}

impl KvStore for SqliteStore {
    fn create_namespace(&self, namespace: &[u8]) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO namespaces (name) VALUES (?1)",
            params![namespace],
        )?;
        Ok(())
    }

    fn put(&self, namespace: &[u8], key: &[u8], value: &[u8]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        Self::require_namespace(&tx, namespace)?;
        tx.execute(
            "INSERT INTO entries (namespace, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace, key) DO UPDATE SET value = ?3",
            params![namespace, key, value],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn get(&self, namespace: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        Self::require_namespace(&tx, namespace)?;
        let value = tx
            .query_row(
                "SELECT value FROM entries WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        tx.commit()?;
        Ok(value)
    }

    fn delete(&self, namespace: &[u8], key: &[u8]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        Self::require_namespace(&tx, namespace)?;
        tx.execute(
            "DELETE FROM entries WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn for_each(
        &self,
        namespace: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>,
    ) -> Result<()> {
        // read everything first so the visitor can call back into the store
        let pairs = {
            let mut conn = self.lock()?;
            let tx = conn.transaction()?;

            Self::require_namespace(&tx, namespace)?;
            let pairs = {
                let mut stmt = tx
                    .prepare("SELECT key, value FROM entries WHERE namespace = ?1 ORDER BY key")?;
                let rows = stmt.query_map(params![namespace], |row| {
                    Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, Vec<u8>>(1)?))
                })?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            };
            tx.commit()?;
            pairs
        };

        for (key, value) in &pairs {
            visitor(key, value)?;
        }
        Ok(())
    }
}
