use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::Quote;
use crate::domain::traits::QuoteStore;
use crate::application::errors::StorageError;

/// SQLite-backed quote table
pub struct SqliteQuoteStore {
    conn: Mutex<Connection>,
}

impl SqliteQuoteStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self { conn: Mutex::new(conn) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS quotes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(50) NOT NULL,
                quote VARCHAR(2000) NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_quotes_name ON quotes(name)",
            [],
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn quote_from_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: row.get(0)?,
        name: row.get(1)?,
        text: row.get(2)?,
    })
}

impl QuoteStore for SqliteQuoteStore {
    fn insert(&self, name: &str, text: &str) -> Result<Quote, StorageError> {
        // Insert and id read happen under one lock
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO quotes (name, quote) VALUES (?1, ?2)",
            rusqlite::params![name, text],
        )?;

        Ok(Quote {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            text: text.to_string(),
        })
    }

    fn random(&self) -> Result<Option<Quote>, StorageError> {
        let conn = self.conn()?;
        let quote = conn
            .query_row(
                "SELECT id, name, quote FROM quotes ORDER BY RANDOM() LIMIT 1",
                [],
                quote_from_row,
            )
            .optional()?;
        Ok(quote)
    }

    fn random_by_name(&self, name: &str) -> Result<Option<Quote>, StorageError> {
        let conn = self.conn()?;
        let quote = conn
            .query_row(
                "SELECT id, name, quote FROM quotes WHERE name = ?1 ORDER BY RANDOM() LIMIT 1",
                [name],
                quote_from_row,
            )
            .optional()?;
        Ok(quote)
    }

    fn count(&self) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count)
    }
}
