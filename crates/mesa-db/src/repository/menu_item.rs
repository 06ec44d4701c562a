//! # Menu Item Repository
//!
//! Orderable items and the lookups that replace object navigation:
//! an item's menu, its type, and the orders it appears on.

use mesa_core::{Menu, MenuItem, MenuItemType, NewMenuItem, Order};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};

pub(crate) const SELECT_MENU_ITEM: &str =
    "SELECT id, name, price_cents, menu_id, menu_type_id FROM menu_items";

/// Repository for menu item database operations.
#[derive(Debug)]
pub struct MenuItemRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MenuItemRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        MenuItemRepository { conn }
    }

    /// Inserts a menu item.
    ///
    /// ## Errors
    /// - `Validation` for an empty/long name or a negative price
    /// - `ForeignKeyViolation` when the menu or type does not exist
    pub async fn insert(&mut self, item: &NewMenuItem) -> DbResult<MenuItem> {
        item.validate()?;

        debug!(
            name = %item.name,
            price_cents = item.price_cents,
            menu_id = item.menu_id,
            menu_type_id = item.menu_type_id,
            "Inserting menu item"
        );

        let id = sqlx::query(
            r#"
            INSERT INTO menu_items (name, price_cents, menu_id, menu_type_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.menu_id)
        .bind(item.menu_type_id)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();

        Ok(MenuItem {
            id,
            name: item.name.clone(),
            price_cents: item.price_cents,
            menu_id: item.menu_id,
            menu_type_id: item.menu_type_id,
        })
    }

    /// Gets a menu item by ID.
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!("{SELECT_MENU_ITEM} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(item)
    }

    /// Lists all menu items.
    pub async fn list(&mut self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!("{SELECT_MENU_ITEM} ORDER BY id"))
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(items)
    }

    /// The menu an item belongs to.
    pub async fn menu(&mut self, item: &MenuItem) -> DbResult<Menu> {
        sqlx::query_as::<_, Menu>("SELECT id, name FROM menus WHERE id = ?1")
            .bind(item.menu_id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found("Menu", item.menu_id))
    }

    /// The type an item is categorized under.
    pub async fn item_type(&mut self, item: &MenuItem) -> DbResult<MenuItemType> {
        sqlx::query_as::<_, MenuItemType>("SELECT id, name FROM menu_item_types WHERE id = ?1")
            .bind(item.menu_type_id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItemType", item.menu_type_id))
    }

    /// Orders that include this item.
    pub async fn orders(&mut self, menu_item_id: i64) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.table_id, o.server_id, o.price_cents, o.status
            FROM orders o
            INNER JOIN order_details d ON d.order_id = o.id
            WHERE d.menu_item_id = ?1
            ORDER BY o.id
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(orders)
    }

    /// Deletes a menu item.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` while the item is on any order
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
