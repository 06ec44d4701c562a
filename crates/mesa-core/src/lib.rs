//! # mesa-core: Restaurant Domain Model for Mesa POS
//!
//! Entities and rules for a restaurant point of sale, as pure types with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mesa POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ mesa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │credential │  │ validation│  │   │
//! │  │   │ Employee  │  │   Money   │  │ Argon2id  │  │   rules   │  │   │
//! │  │   │ MenuItem  │  │           │  │  hashing  │  │  checks   │  │   │
//! │  │   │  Order    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mesa-db (Database Layer)                     │   │
//! │  │        SQLite schema, repositories, seed loader                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Employee, Menu, MenuItem, Table, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`credential`] - Salted one-way password hashes
//! - [`error`] - Domain error types
//! - [`validation`] - Field rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use mesa_core::{Money, OrderStatus};
//!
//! let fries = Money::from_major_minor(3, 50);
//! assert_eq!(fries.to_string(), "$3.50");
//!
//! let status: OrderStatus = "Active".parse().unwrap();
//! assert_eq!(status.transition_to(OrderStatus::Ended).unwrap(), OrderStatus::Ended);
//! assert!("Pending".parse::<OrderStatus>().is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credential;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use credential::{hash_password, verify_password};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Column Limits
// =============================================================================
// SQLite does not enforce VARCHAR lengths, so these are checked in
// `validation` before a row reaches the database.

/// Maximum length of an employee name.
pub const MAX_EMPLOYEE_NAME_LEN: usize = 100;

/// Maximum length of a menu name.
pub const MAX_MENU_NAME_LEN: usize = 30;

/// Maximum length of a menu item name.
pub const MAX_MENU_ITEM_NAME_LEN: usize = 50;

/// Maximum length of a menu item type name.
pub const MAX_MENU_ITEM_TYPE_NAME_LEN: usize = 20;
