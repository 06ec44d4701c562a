//! # Database Migrations
//!
//! Embedded SQL migrations for Mesa POS, and the destructive schema reset
//! used by the seed loader.
//!
//! ## Reset
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Reset                                       │
//! │                                                                         │
//! │  drop_all()                                                            │
//! │       │  DROP TABLE IF EXISTS, children before parents:               │
//! │       │  order_details → orders → menu_items → menu_item_types        │
//! │       │  → menus → tables → employees → _sqlx_migrations              │
//! │       ▼                                                                 │
//! │  run_migrations()                                                      │
//! │       │  _sqlx_migrations is gone, so every migration runs again       │
//! │       ▼                                                                 │
//! │  Empty schema, row ids restart at 1                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Add any new table to [`SCHEMA_TABLES`] so resets drop it
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Every table the schema owns, children before parents.
pub const SCHEMA_TABLES: &[&str] = &[
    "order_details",
    "orders",
    "menu_items",
    "menu_item_types",
    "menus",
    "tables",
    "employees",
];

/// Runs all pending database migrations.
///
/// Idempotent: already-applied migrations are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Drops every schema object, including the migration history.
///
/// Indexes and triggers go with their tables. Destroys all data.
pub async fn drop_all(conn: &mut SqliteConnection) -> DbResult<()> {
    info!("Dropping all schema objects");

    for table in SCHEMA_TABLES.iter().chain(std::iter::once(&"_sqlx_migrations")) {
        debug!(table = %table, "Dropping table");
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // No history table means nothing has been applied yet
    let has_history: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await?;

    if !has_history {
        return Ok((total, 0));
    }

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
