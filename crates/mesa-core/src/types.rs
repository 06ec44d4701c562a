//! # Domain Types
//!
//! The entities a restaurant point of sale persists.
//!
//! ## Entity Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐        ┌──────────────┐        ┌──────────────┐      │
//! │  │     Menu     │ 1    * │   MenuItem   │ *    1 │ MenuItemType │      │
//! │  │  id, name    │◄───────│ menu_id      │───────►│  id, name    │      │
//! │  └──────────────┘        │ menu_type_id │        └──────────────┘      │
//! │                          │ price_cents  │                               │
//! │                          └──────┬───────┘                               │
//! │                                 │ *                                     │
//! │                          ┌──────┴───────┐                               │
//! │                          │ OrderDetail  │  (menu_item_id, order_id)     │
//! │                          └──────┬───────┘                               │
//! │                                 │ *                                     │
//! │  ┌──────────────┐ 1    * ┌──────┴───────┐ *    1 ┌──────────────┐      │
//! │  │    Table     │◄───────│    Order     │───────►│   Employee   │      │
//! │  │ number (uniq)│        │ status       │        │ employee_no  │      │
//! │  │ capacity     │        │ price_cents  │        │ (unique)     │      │
//! │  └──────────────┘        └──────────────┘        └──────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Foreign Keys, Not Object Graphs
//! Entities carry only the ids of what they point at. Walking a relationship
//! (a menu's items, an order's items) is a repository query in `mesa-db`.
//!
//! ## Persisted vs New
//! Every entity has a `New*` counterpart without an `id`. Ids are assigned by
//! SQLite on insert; the repository returns the persisted entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::credential::{hash_password, verify_password};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_capacity, validate_employee_name, validate_employee_number, validate_menu_item_name,
    validate_menu_item_type_name, validate_menu_name, validate_order_price, validate_price,
    validate_table_number, ValidationResult,
};

// =============================================================================
// Employee
// =============================================================================

/// A staff member who can sign in and serve orders.
///
/// The password is held only as an Argon2id hash. It is skipped by serde and
/// the TypeScript bindings, and redacted from `Debug`.
#[derive(Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Business identifier used to sign in. Unique.
    pub employee_number: i64,
    #[serde(skip)]
    #[ts(skip)]
    pub hashed_password: String,
}

impl Employee {
    /// Replaces the stored credential with a fresh salted hash of `plaintext`.
    pub fn set_credential(&mut self, plaintext: &str) -> CoreResult<()> {
        self.hashed_password = hash_password(plaintext)?;
        Ok(())
    }

    /// Returns whether `guess` matches the stored credential.
    pub fn check_credential(&self, guess: &str) -> bool {
        verify_password(guess, &self.hashed_password)
    }
}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("employee_number", &self.employee_number)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}

/// An employee that has not been inserted yet.
#[derive(Clone)]
pub struct NewEmployee {
    pub name: String,
    pub employee_number: i64,
    pub hashed_password: String,
}

impl NewEmployee {
    /// Validates the fields and hashes `password`.
    pub fn new(name: impl Into<String>, employee_number: i64, password: &str) -> CoreResult<Self> {
        let name = name.into();
        validate_employee_name(&name)?;
        validate_employee_number(employee_number)?;

        Ok(NewEmployee {
            name,
            employee_number,
            hashed_password: hash_password(password)?,
        })
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_employee_name(&self.name)?;
        validate_employee_number(self.employee_number)?;
        if self.hashed_password.is_empty() {
            return Err(ValidationError::Required {
                field: "hashed_password".to_string(),
            });
        }
        Ok(())
    }

    /// Returns whether `guess` matches the credential set at construction.
    pub fn check_credential(&self, guess: &str) -> bool {
        verify_password(guess, &self.hashed_password)
    }
}

impl fmt::Debug for NewEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEmployee")
            .field("name", &self.name)
            .field("employee_number", &self.employee_number)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Menu
// =============================================================================

/// A named collection of menu items ("Dinner", "Brunch").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Menu {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenu {
    pub name: String,
}

impl NewMenu {
    pub fn new(name: impl Into<String>) -> Self {
        NewMenu { name: name.into() }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_menu_name(&self.name)
    }
}

// =============================================================================
// Menu Item Type
// =============================================================================

/// A category of menu item ("Beverages", "Entrees", "Sides").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItemType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItemType {
    pub name: String,
}

impl NewMenuItemType {
    pub fn new(name: impl Into<String>) -> Self {
        NewMenuItemType { name: name.into() }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_menu_item_type_name(&self.name)
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// Something that can be ordered.
///
/// Belongs to exactly one [`Menu`] and one [`MenuItemType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Price in cents. Never negative.
    pub price_cents: i64,
    pub menu_id: i64,
    pub menu_type_id: i64,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price_cents: i64,
    pub menu_id: i64,
    pub menu_type_id: i64,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, price: Money, menu_id: i64, menu_type_id: i64) -> Self {
        NewMenuItem {
            name: name.into(),
            price_cents: price.cents(),
            menu_id,
            menu_type_id,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_menu_item_name(&self.name)?;
        validate_price(Money::from_cents(self.price_cents))
    }
}

// =============================================================================
// Table
// =============================================================================

/// A dining table on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Table {
    pub id: i64,
    /// Number printed on the table. Unique.
    pub number: i64,
    /// Seats. Always positive.
    pub capacity: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewTable {
    pub number: i64,
    pub capacity: i64,
}

impl NewTable {
    pub fn new(number: i64, capacity: i64) -> Self {
        NewTable { number, capacity }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_table_number(self.number)?;
        validate_capacity(self.capacity)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order.
///
/// ```text
/// Active ──► Ended
/// ```
///
/// One direction only. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum OrderStatus {
    /// Guests are seated and the order is open.
    Active,
    /// The order is closed.
    Ended,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 2] = [OrderStatus::Active, OrderStatus::Ended];

    /// The value stored in the `orders.status` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "Active",
            OrderStatus::Ended => "Ended",
        }
    }

    /// Checks a status change against the lifecycle.
    ///
    /// Staying `Active` and `Active → Ended` are allowed. Nothing leaves `Ended`.
    pub fn transition_to(self, next: OrderStatus) -> CoreResult<OrderStatus> {
        match (self, next) {
            (OrderStatus::Active, _) => Ok(next),
            (OrderStatus::Ended, _) => Err(CoreError::InvalidOrderTransition {
                from: self,
                to: next,
            }),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Active
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed at a table and served by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    /// The employee serving the order.
    pub server_id: i64,
    /// Order total in cents.
    pub price_cents: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Returns the total as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// Items and price may only change while the order is Active.
    pub fn ensure_editable(&self) -> CoreResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(CoreError::OrderEnded { order_id: self.id })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub table_id: i64,
    pub server_id: i64,
    pub price_cents: i64,
    pub status: OrderStatus,
}

impl NewOrder {
    /// An empty, active order.
    pub fn active(table_id: i64, server_id: i64) -> Self {
        NewOrder {
            table_id,
            server_id,
            price_cents: 0,
            status: OrderStatus::Active,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_order_price(Money::from_cents(self.price_cents))
    }
}

// =============================================================================
// Order Details
// =============================================================================

/// One row of the `order_details` join table.
///
/// Identity is the pair `(menu_item_id, order_id)`; the row lives and dies
/// with the association between an order and a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderDetail {
    pub menu_item_id: i64,
    pub order_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee {
            id: 1,
            name: "Margot".to_string(),
            employee_number: 1234,
            hashed_password: String::new(),
        }
    }

    #[test]
    fn test_check_credential_tracks_latest_value() {
        let mut employee = employee();
        assert!(!employee.check_credential(""));

        employee.set_credential("password").unwrap();
        assert!(employee.check_credential("password"));

        employee.set_credential("new-secret").unwrap();
        assert!(employee.check_credential("new-secret"));
        assert!(!employee.check_credential("password"));
    }

    #[test]
    fn test_check_credential_does_not_mutate() {
        let mut employee = employee();
        employee.set_credential("password").unwrap();
        let before = employee.hashed_password.clone();

        assert!(!employee.check_credential("wrong"));
        assert!(employee.check_credential("password"));
        assert_eq!(employee.hashed_password, before);
    }

    #[test]
    fn test_set_credential_rehashes() {
        let mut employee = employee();
        employee.set_credential("password").unwrap();
        let first = employee.hashed_password.clone();

        employee.set_credential("password").unwrap();
        assert_ne!(employee.hashed_password, first);
    }

    #[test]
    fn test_hash_never_leaks() {
        let mut employee = employee();
        employee.set_credential("password").unwrap();

        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("argon2"));

        let debug = format!("{:?}", employee);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("argon2"));
    }

    #[test]
    fn test_new_employee_validates() {
        let employee = NewEmployee::new("Margot", 1234, "password").unwrap();
        assert!(employee.check_credential("password"));

        assert!(NewEmployee::new("", 1234, "password").is_err());
        assert!(NewEmployee::new("Margot", 0, "password").is_err());
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("Active".parse::<OrderStatus>().unwrap(), OrderStatus::Active);
        assert_eq!("Ended".parse::<OrderStatus>().unwrap(), OrderStatus::Ended);

        for bad in ["active", "ENDED", "Pending", ""] {
            let err = bad.parse::<OrderStatus>().unwrap_err();
            assert!(matches!(err, ValidationError::NotAllowed { .. }));
        }
    }

    #[test]
    fn test_order_status_serde_uses_column_values() {
        assert_eq!(serde_json::to_string(&OrderStatus::Ended).unwrap(), "\"Ended\"");
        assert!(serde_json::from_str::<OrderStatus>("\"Closed\"").is_err());
    }

    #[test]
    fn test_order_status_is_one_way() {
        assert_eq!(
            OrderStatus::Active.transition_to(OrderStatus::Ended).unwrap(),
            OrderStatus::Ended
        );
        assert_eq!(
            OrderStatus::Active.transition_to(OrderStatus::Active).unwrap(),
            OrderStatus::Active
        );
        assert!(matches!(
            OrderStatus::Ended.transition_to(OrderStatus::Active),
            Err(CoreError::InvalidOrderTransition { .. })
        ));
        assert!(OrderStatus::Ended.transition_to(OrderStatus::Ended).is_err());
    }

    #[test]
    fn test_only_active_orders_are_editable() {
        let mut order = Order {
            id: 4,
            table_id: 1,
            server_id: 1,
            price_cents: 450,
            status: OrderStatus::Active,
        };
        assert!(order.ensure_editable().is_ok());

        order.status = OrderStatus::Ended;
        assert!(matches!(
            order.ensure_editable(),
            Err(CoreError::OrderEnded { order_id: 4 })
        ));
    }

    #[test]
    fn test_new_order_starts_active_and_empty() {
        let order = NewOrder::active(3, 1);
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(order.price_cents, 0);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_new_menu_item_rejects_negative_price() {
        let item = NewMenuItem::new("Refund", Money::from_cents(-1), 1, 1);
        assert!(matches!(
            item.validate(),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let free = NewMenuItem::new("Water", Money::zero(), 1, 1);
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_menu_item_price() {
        let item = MenuItem {
            id: 1,
            name: "Jambalaya".to_string(),
            price_cents: 2198,
            menu_id: 1,
            menu_type_id: 2,
        };
        assert_eq!(item.price().to_string(), "$21.98");
    }
}
