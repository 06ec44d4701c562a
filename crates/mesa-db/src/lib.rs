//! # mesa-db: Database Layer for Mesa POS
//!
//! SQLite persistence for the restaurant model in `mesa-core`, using sqlx
//! for async access, plus the seed loader that resets a database to its
//! starting dataset.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mesa POS Data Flow                               │
//! │                                                                         │
//! │  seed binary / library consumer                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     mesa-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ EmployeeRepo  │    │ 001_initial_ │  │   │
//! │  │   │ begin/acquire │◄───│ MenuRepo      │    │   schema.sql │  │   │
//! │  │   │ reset_schema  │    │ OrderRepo ... │    │ drop_all     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │          ▲                                                      │   │
//! │  │   ┌──────┴────────┐    ┌───────────────┐                       │   │
//! │  │   │   DbConfig    │    │  seed::run    │                       │   │
//! │  │   │  from_env()   │    │  (seed.rs)    │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   DATABASE_URL (e.g. sqlite://mesa.db?mode=rwc)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment configuration
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations and schema reset
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (employee, menu, order, etc.)
//! - [`seed`] - Destructive reset plus starting dataset
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mesa_db::{Database, DbConfig, OrderRepository};
//! use mesa_core::NewOrder;
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let mut tx = db.begin().await?;
//! let mut orders = OrderRepository::new(&mut tx);
//! let order = orders.insert(&NewOrder::active(table_id, server_id)).await?;
//! orders.add_item(order.id, fries_id).await?;
//! orders.recalculate_price(order.id).await?;
//! tx.commit().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ConfigError;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use seed::SeedReport;

// Repository re-exports for convenience
pub use repository::{
    EmployeeRepository, MenuItemRepository, MenuItemTypeRepository, MenuRepository,
    OrderRepository, TableRepository,
};
