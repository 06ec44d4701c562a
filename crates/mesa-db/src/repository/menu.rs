//! # Menu and Menu Item Type Repositories
//!
//! Both own menu items through a RESTRICT foreign key: a menu or a type
//! cannot be deleted while any item still points at it.

use mesa_core::{Menu, MenuItem, MenuItemType, NewMenu, NewMenuItemType};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::menu_item::SELECT_MENU_ITEM;

// =============================================================================
// Menu
// =============================================================================

/// Repository for menu database operations.
#[derive(Debug)]
pub struct MenuRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MenuRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        MenuRepository { conn }
    }

    /// Inserts a menu.
    pub async fn insert(&mut self, menu: &NewMenu) -> DbResult<Menu> {
        menu.validate()?;

        debug!(name = %menu.name, "Inserting menu");

        let id = sqlx::query("INSERT INTO menus (name) VALUES (?1)")
            .bind(&menu.name)
            .execute(&mut *self.conn)
            .await?
            .last_insert_rowid();

        Ok(Menu {
            id,
            name: menu.name.clone(),
        })
    }

    /// Gets a menu by ID.
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Menu>> {
        let menu = sqlx::query_as::<_, Menu>("SELECT id, name FROM menus WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(menu)
    }

    /// Lists all menus.
    pub async fn list(&mut self) -> DbResult<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>("SELECT id, name FROM menus ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(menus)
    }

    /// Items on a menu, in insertion order.
    pub async fn items(&mut self, menu_id: i64) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "{SELECT_MENU_ITEM} WHERE menu_id = ?1 ORDER BY id"
        ))
        .bind(menu_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    /// Deletes a menu.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` while the menu still has items
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menus WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu", id));
        }

        Ok(())
    }

    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Menu Item Type
// =============================================================================

/// Repository for menu item type database operations.
#[derive(Debug)]
pub struct MenuItemTypeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MenuItemTypeRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        MenuItemTypeRepository { conn }
    }

    /// Inserts a menu item type.
    pub async fn insert(&mut self, item_type: &NewMenuItemType) -> DbResult<MenuItemType> {
        item_type.validate()?;

        debug!(name = %item_type.name, "Inserting menu item type");

        let id = sqlx::query("INSERT INTO menu_item_types (name) VALUES (?1)")
            .bind(&item_type.name)
            .execute(&mut *self.conn)
            .await?
            .last_insert_rowid();

        Ok(MenuItemType {
            id,
            name: item_type.name.clone(),
        })
    }

    /// Gets a menu item type by ID.
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<MenuItemType>> {
        let item_type = sqlx::query_as::<_, MenuItemType>(
            "SELECT id, name FROM menu_item_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(item_type)
    }

    /// Gets the first menu item type with the given name.
    ///
    /// Names are not unique; the lowest id wins.
    pub async fn get_by_name(&mut self, name: &str) -> DbResult<Option<MenuItemType>> {
        let item_type = sqlx::query_as::<_, MenuItemType>(
            "SELECT id, name FROM menu_item_types WHERE name = ?1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(item_type)
    }

    /// Lists all menu item types.
    pub async fn list(&mut self) -> DbResult<Vec<MenuItemType>> {
        let types =
            sqlx::query_as::<_, MenuItemType>("SELECT id, name FROM menu_item_types ORDER BY id")
                .fetch_all(&mut *self.conn)
                .await?;

        Ok(types)
    }

    /// Items of a given type, across all menus.
    pub async fn items(&mut self, menu_type_id: i64) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "{SELECT_MENU_ITEM} WHERE menu_type_id = ?1 ORDER BY id"
        ))
        .bind(menu_type_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    /// Deletes a menu item type.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` while any item still has this type
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_item_types WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItemType", id));
        }

        Ok(())
    }

    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item_types")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::database;
    use crate::repository::MenuItemRepository;
    use mesa_core::{Money, NewMenuItem};

    #[tokio::test]
    async fn test_menu_owns_items() {
        let db = database().await;
        let mut conn = db.acquire().await.unwrap();

        let dinner = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new("Dinner"))
            .await
            .unwrap();
        let brunch = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new("Brunch"))
            .await
            .unwrap();
        let sides = MenuItemTypeRepository::new(&mut conn)
            .insert(&NewMenuItemType::new("Sides"))
            .await
            .unwrap();

        let mut items = MenuItemRepository::new(&mut conn);
        items
            .insert(&NewMenuItem::new("French fries", Money::from_cents(350), dinner.id, sides.id))
            .await
            .unwrap();
        items
            .insert(&NewMenuItem::new("Hash browns", Money::from_cents(300), brunch.id, sides.id))
            .await
            .unwrap();

        let dinner_items = MenuRepository::new(&mut conn).items(dinner.id).await.unwrap();
        assert_eq!(dinner_items.len(), 1);
        assert_eq!(dinner_items[0].name, "French fries");

        let side_items = MenuItemTypeRepository::new(&mut conn)
            .items(sides.id)
            .await
            .unwrap();
        assert_eq!(side_items.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_menu_with_items_is_restricted() {
        let db = database().await;
        let mut conn = db.acquire().await.unwrap();

        let dinner = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new("Dinner"))
            .await
            .unwrap();
        let sides = MenuItemTypeRepository::new(&mut conn)
            .insert(&NewMenuItemType::new("Sides"))
            .await
            .unwrap();
        let fries = MenuItemRepository::new(&mut conn)
            .insert(&NewMenuItem::new("French fries", Money::from_cents(350), dinner.id, sides.id))
            .await
            .unwrap();

        let err = MenuRepository::new(&mut conn).delete(dinner.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let err = MenuItemTypeRepository::new(&mut conn)
            .delete(sides.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // Nothing was removed
        assert_eq!(MenuRepository::new(&mut conn).count().await.unwrap(), 1);
        assert_eq!(MenuItemTypeRepository::new(&mut conn).count().await.unwrap(), 1);
        assert!(MenuItemRepository::new(&mut conn)
            .get_by_id(fries.id)
            .await
            .unwrap()
            .is_some());

        // Once the item is gone both deletes succeed
        MenuItemRepository::new(&mut conn).delete(fries.id).await.unwrap();
        MenuRepository::new(&mut conn).delete(dinner.id).await.unwrap();
        MenuItemTypeRepository::new(&mut conn).delete(sides.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_menu_name_limits() {
        let db = database().await;
        let mut conn = db.acquire().await.unwrap();

        let err = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new("x".repeat(31)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = MenuItemTypeRepository::new(&mut conn)
            .insert(&NewMenuItemType::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // Trailing spaces are stored, so they count
        let padded = format!("{}     ", "x".repeat(30));
        let err = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new(padded))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(MenuRepository::new(&mut conn).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_type_lookup_by_name() {
        let db = database().await;
        let mut conn = db.acquire().await.unwrap();
        let mut types = MenuItemTypeRepository::new(&mut conn);

        for name in ["Beverages", "Entrees", "Sides"] {
            types.insert(&NewMenuItemType::new(name)).await.unwrap();
        }

        let entrees = types.get_by_name("Entrees").await.unwrap().unwrap();
        assert_eq!(entrees.id, 2);
        assert!(types.get_by_name("Desserts").await.unwrap().is_none());
        assert_eq!(types.list().await.unwrap().len(), 3);
    }
}
