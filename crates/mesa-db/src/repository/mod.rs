//! # Repository Module
//!
//! Database repository implementations for Mesa POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Explicit Unit of Work                                │
//! │                                                                         │
//! │  let mut tx = db.begin().await?;                                       │
//! │       │                                                                 │
//! │       │  MenuRepository::new(&mut tx).insert(&NewMenu::new("Dinner"))   │
//! │       │  MenuItemRepository::new(&mut tx).insert(&fries)                │
//! │       ▼                                                                 │
//! │  tx.commit().await?;                                                   │
//! │                                                                         │
//! │  A repository borrows one `&mut SqliteConnection` for its lifetime.    │
//! │  Pass a pooled connection for autocommit, or a transaction to group    │
//! │  writes. Relationship lookups (a menu's items, an order's items) live  │
//! │  here rather than on the entities.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EmployeeRepository`] - Staff and credentials
//! - [`MenuRepository`] - Menus and their items
//! - [`MenuItemTypeRepository`] - Item categories and their items
//! - [`MenuItemRepository`] - Orderable items
//! - [`TableRepository`] - Dining tables
//! - [`OrderRepository`] - Orders and the `order_details` join table

pub mod employee;
pub mod menu;
pub mod menu_item;
pub mod order;
pub mod table;

pub use employee::EmployeeRepository;
pub use menu::{MenuItemTypeRepository, MenuRepository};
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use table::TableRepository;
