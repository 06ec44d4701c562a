//! # Validation Module
//!
//! Field rules for Mesa POS entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (Rust)                                           │
//! │  ├── Name lengths (SQLite ignores VARCHAR(n))                          │
//! │  └── Sign rules on prices, numbers, capacities                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK constraints                             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mesa_core::validation::{validate_menu_name, validate_capacity};
//!
//! assert!(validate_menu_name("Dinner").is_ok());
//! assert!(validate_capacity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    MAX_EMPLOYEE_NAME_LEN, MAX_MENU_ITEM_NAME_LEN, MAX_MENU_ITEM_TYPE_NAME_LEN, MAX_MENU_NAME_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a name is not blank and at most `max` characters.
///
/// The length is the stored value's, surrounding whitespace included.
fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an employee name (1-100 characters).
pub fn validate_employee_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_EMPLOYEE_NAME_LEN)
}

/// Validates a menu name (1-30 characters).
pub fn validate_menu_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_MENU_NAME_LEN)
}

/// Validates a menu item name (1-50 characters).
pub fn validate_menu_item_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_MENU_ITEM_NAME_LEN)
}

/// Validates a menu item type name (1-20 characters).
pub fn validate_menu_item_type_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_MENU_ITEM_TYPE_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_not_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Employee numbers are positive.
pub fn validate_employee_number(number: i64) -> ValidationResult<()> {
    validate_positive("employee_number", number)
}

/// Table numbers are positive.
pub fn validate_table_number(number: i64) -> ValidationResult<()> {
    validate_positive("number", number)
}

/// A table seats at least one guest.
pub fn validate_capacity(capacity: i64) -> ValidationResult<()> {
    validate_positive("capacity", capacity)
}

/// Menu prices may be zero but never negative.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_not_negative("price", price)
}

/// Order totals may be zero but never negative.
pub fn validate_order_price(price: Money) -> ValidationResult<()> {
    validate_not_negative("price", price)
}
