//! # Table Repository
//!
//! Dining tables, keyed for staff by their printed number.

use mesa_core::{NewTable, Table};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for dining table database operations.
#[derive(Debug)]
pub struct TableRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TableRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        TableRepository { conn }
    }

    /// Inserts a table.
    ///
    /// ## Errors
    /// - `Validation` for a non-positive number or capacity
    /// - `UniqueViolation` when the number is taken
    pub async fn insert(&mut self, table: &NewTable) -> DbResult<Table> {
        table.validate()?;

        debug!(number = table.number, capacity = table.capacity, "Inserting table");

        let id = sqlx::query("INSERT INTO tables (number, capacity) VALUES (?1, ?2)")
            .bind(table.number)
            .bind(table.capacity)
            .execute(&mut *self.conn)
            .await?
            .last_insert_rowid();

        Ok(Table {
            id,
            number: table.number,
            capacity: table.capacity,
        })
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Table>> {
        let table = sqlx::query_as::<_, Table>("SELECT id, number, capacity FROM tables WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(table)
    }

    pub async fn get_by_number(&mut self, number: i64) -> DbResult<Option<Table>> {
        let table =
            sqlx::query_as::<_, Table>("SELECT id, number, capacity FROM tables WHERE number = ?1")
                .bind(number)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(table)
    }

    /// Lists all tables by number.
    pub async fn list(&mut self) -> DbResult<Vec<Table>> {
        let tables =
            sqlx::query_as::<_, Table>("SELECT id, number, capacity FROM tables ORDER BY number")
                .fetch_all(&mut *self.conn)
                .await?;

        Ok(tables)
    }

    /// Deletes a table.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` while orders reference the table
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM tables WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }

        Ok(())
    }

    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
