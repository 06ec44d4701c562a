//! # Order Repository
//!
//! Orders and their menu items through the `order_details` join table.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  insert(NewOrder::active(table, server))   status = Active, price = 0  │
//! │       │                                                                 │
//! │       ├── add_item / remove_item           order_details rows          │
//! │       ├── recalculate_price                price = Σ item prices       │
//! │       ▼                                                                 │
//! │  end(order_id)                             status = Ended (terminal)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delete(order_id)                          order_details CASCADE       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mesa_core::{CoreError, MenuItem, Money, NewOrder, Order, OrderDetail, OrderStatus};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const SELECT_ORDER: &str = "SELECT id, table_id, server_id, price_cents, status FROM orders";

/// Repository for order database operations.
#[derive(Debug)]
pub struct OrderRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> OrderRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        OrderRepository { conn }
    }

    /// Inserts an order.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` when the table or server does not exist
    pub async fn insert(&mut self, order: &NewOrder) -> DbResult<Order> {
        order.validate()?;

        debug!(
            table_id = order.table_id,
            server_id = order.server_id,
            status = %order.status,
            "Inserting order"
        );

        let id = sqlx::query(
            r#"
            INSERT INTO orders (table_id, server_id, price_cents, status)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order.table_id)
        .bind(order.server_id)
        .bind(order.price_cents)
        .bind(order.status)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();

        Ok(Order {
            id,
            table_id: order.table_id,
            server_id: order.server_id,
            price_cents: order.price_cents,
            status: order.status,
        })
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(order)
    }

    async fn require(&mut self, id: i64) -> DbResult<Order> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Active orders, oldest first.
    pub async fn list_active(&mut self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "{SELECT_ORDER} WHERE status = ?1 ORDER BY id"
        ))
        .bind(OrderStatus::Active)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(orders)
    }

    /// Loads an order that may still be changed.
    async fn require_active(&mut self, id: i64) -> DbResult<Order> {
        let order = self.require(id).await?;
        order.ensure_editable()?;
        Ok(order)
    }

    /// Links a menu item to an order.
    ///
    /// ## Errors
    /// - `NotFound` when the order does not exist
    /// - `Core(OrderEnded)` when the order has ended
    /// - `UniqueViolation` when the item is already on the order
    /// - `ForeignKeyViolation` when the menu item does not exist
    pub async fn add_item(&mut self, order_id: i64, menu_item_id: i64) -> DbResult<OrderDetail> {
        self.require_active(order_id).await?;

        debug!(order_id, menu_item_id, "Adding item to order");

        sqlx::query("INSERT INTO order_details (menu_item_id, order_id) VALUES (?1, ?2)")
            .bind(menu_item_id)
            .bind(order_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(OrderDetail {
            menu_item_id,
            order_id,
        })
    }

    /// Unlinks a menu item from an order.
    ///
    /// ## Errors
    /// - `Core(OrderEnded)` when the order has ended
    pub async fn remove_item(&mut self, order_id: i64, menu_item_id: i64) -> DbResult<()> {
        self.require_active(order_id).await?;

        let result =
            sqlx::query("DELETE FROM order_details WHERE menu_item_id = ?1 AND order_id = ?2")
                .bind(menu_item_id)
                .bind(order_id)
                .execute(&mut *self.conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "OrderDetail",
                format!("({menu_item_id}, {order_id})"),
            ));
        }

        Ok(())
    }

    /// Menu items on an order.
    pub async fn items(&mut self, order_id: i64) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT m.id, m.name, m.price_cents, m.menu_id, m.menu_type_id
            FROM menu_items m
            INNER JOIN order_details d ON d.menu_item_id = m.id
            WHERE d.order_id = ?1
            ORDER BY m.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    /// Sets the order price to the sum of its items' prices.
    ///
    /// ## Errors
    /// - `Core(OrderEnded)` when the order has ended
    /// - `Core(AmountOverflow)` when the total does not fit in `i64` cents
    pub async fn recalculate_price(&mut self, order_id: i64) -> DbResult<Money> {
        self.require_active(order_id).await?;

        let items = self.items(order_id).await?;
        let total = Money::checked_sum(items.iter().map(MenuItem::price)).ok_or_else(|| {
            CoreError::AmountOverflow {
                field: "price".to_string(),
            }
        })?;

        sqlx::query("UPDATE orders SET price_cents = ?1 WHERE id = ?2")
            .bind(total.cents())
            .bind(order_id)
            .execute(&mut *self.conn)
            .await?;

        debug!(order_id, total = %total, "Order price recalculated");
        Ok(total)
    }

    /// Moves an order to `next`, if the lifecycle allows it.
    ///
    /// ## Errors
    /// - `Core(InvalidOrderTransition)` when the order has already Ended
    pub async fn set_status(&mut self, order_id: i64, next: OrderStatus) -> DbResult<Order> {
        let mut order = self.require(order_id).await?;
        order.status = order.status.transition_to(next)?;

        sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
            .bind(order.status)
            .bind(order_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(order)
    }

    /// Closes an order.
    pub async fn end(&mut self, order_id: i64) -> DbResult<Order> {
        let order = self.set_status(order_id, OrderStatus::Ended).await?;
        info!(order_id, price = %order.price(), "Order ended");
        Ok(order)
    }

    /// Deletes an order together with its `order_details` rows.
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use crate::repository::test_support::database;
    use crate::repository::{
        EmployeeRepository, MenuItemRepository, MenuItemTypeRepository, MenuRepository,
        TableRepository,
    };
    use mesa_core::{NewEmployee, NewMenu, NewMenuItem, NewMenuItemType, NewTable};

    struct Fixture {
        table_id: i64,
        server_id: i64,
        fries_id: i64,
        soda_id: i64,
    }

    async fn fixture(db: &Database) -> Fixture {
        let mut conn = db.acquire().await.unwrap();

        let server = EmployeeRepository::new(&mut conn)
            .insert(&NewEmployee::new("Margot", 1234, "password").unwrap())
            .await
            .unwrap();
        let table = TableRepository::new(&mut conn)
            .insert(&NewTable::new(1, 2))
            .await
            .unwrap();
        let dinner = MenuRepository::new(&mut conn)
            .insert(&NewMenu::new("Dinner"))
            .await
            .unwrap();
        let sides = MenuItemTypeRepository::new(&mut conn)
            .insert(&NewMenuItemType::new("Sides"))
            .await
            .unwrap();
        let beverages = MenuItemTypeRepository::new(&mut conn)
            .insert(&NewMenuItemType::new("Beverages"))
            .await
            .unwrap();

        let mut items = MenuItemRepository::new(&mut conn);
        let fries = items
            .insert(&NewMenuItem::new("French fries", Money::from_cents(350), dinner.id, sides.id))
            .await
            .unwrap();
        let soda = items
            .insert(&NewMenuItem::new("Dr. Pepper", Money::from_cents(100), dinner.id, beverages.id))
            .await
            .unwrap();

        Fixture {
            table_id: table.id,
            server_id: server.id,
            fries_id: fries.id,
            soda_id: soda.id,
        }
    }

    #[tokio::test]
    async fn test_order_items_and_price() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();
        let mut orders = OrderRepository::new(&mut conn);

        let order = orders
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();
        orders.add_item(order.id, f.fries_id).await.unwrap();
        orders.add_item(order.id, f.soda_id).await.unwrap();

        let names: Vec<String> = orders
            .items(order.id)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["French fries", "Dr. Pepper"]);

        let total = orders.recalculate_price(order.id).await.unwrap();
        assert_eq!(total.cents(), 450);
        assert_eq!(
            orders.get_by_id(order.id).await.unwrap().unwrap().price_cents,
            450
        );

        orders.remove_item(order.id, f.soda_id).await.unwrap();
        assert_eq!(orders.recalculate_price(order.id).await.unwrap().cents(), 350);
    }

    #[tokio::test]
    async fn test_same_item_twice_violates_composite_key() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();
        let mut orders = OrderRepository::new(&mut conn);

        let order = orders
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();
        orders.add_item(order.id, f.fries_id).await.unwrap();

        let err = orders.add_item(order.id, f.fries_id).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_status_rejected_at_insert() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();

        for status in ["Pending", "active", ""] {
            let err: DbError = sqlx::query(
                "INSERT INTO orders (table_id, server_id, price_cents, status) VALUES (?1, ?2, 0, ?3)",
            )
            .bind(f.table_id)
            .bind(f.server_id)
            .bind(status)
            .execute(&mut *conn)
            .await
            .unwrap_err()
            .into();
            assert!(matches!(err, DbError::CheckViolation { .. }), "{status}");
        }

        assert_eq!(OrderRepository::new(&mut conn).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ended_is_terminal() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();

        let order = OrderRepository::new(&mut conn)
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();

        let ended = OrderRepository::new(&mut conn).end(order.id).await.unwrap();
        assert_eq!(ended.status, OrderStatus::Ended);
        assert!(OrderRepository::new(&mut conn)
            .list_active()
            .await
            .unwrap()
            .is_empty());

        let err = OrderRepository::new(&mut conn)
            .set_status(order.id, OrderStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InvalidOrderTransition { .. })
        ));

        let err = OrderRepository::new(&mut conn).end(order.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InvalidOrderTransition { .. })
        ));

        // The trigger holds even when the repository is bypassed
        for status in ["Active", "Ended"] {
            let err: DbError = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
                .bind(status)
                .bind(order.id)
                .execute(&mut *conn)
                .await
                .unwrap_err()
                .into();
            assert!(matches!(err, DbError::CheckViolation { .. }), "{status}");
        }
    }

    #[tokio::test]
    async fn test_ended_order_items_are_frozen() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();
        let mut orders = OrderRepository::new(&mut conn);

        let order = orders
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();
        orders.add_item(order.id, f.fries_id).await.unwrap();
        orders.recalculate_price(order.id).await.unwrap();
        orders.end(order.id).await.unwrap();

        let frozen = |result: DbResult<_>| {
            matches!(result, Err(DbError::Core(CoreError::OrderEnded { .. })))
        };
        assert!(frozen(orders.add_item(order.id, f.soda_id).await.map(|_| ())));
        assert!(frozen(orders.remove_item(order.id, f.fries_id).await));
        assert!(frozen(orders.recalculate_price(order.id).await.map(|_| ())));

        assert_eq!(orders.items(order.id).await.unwrap().len(), 1);
        assert_eq!(
            orders.get_by_id(order.id).await.unwrap().unwrap().price_cents,
            350
        );
        assert!(matches!(
            orders.add_item(999, f.soda_id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_total_overflow_is_an_error() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();

        let fries = MenuItemRepository::new(&mut conn)
            .get_by_id(f.fries_id)
            .await
            .unwrap()
            .unwrap();
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let mut items = MenuItemRepository::new(&mut conn);
        let first = items
            .insert(&NewMenuItem::new("Caviar", half, fries.menu_id, fries.menu_type_id))
            .await
            .unwrap();
        let second = items
            .insert(&NewMenuItem::new("Truffles", half, fries.menu_id, fries.menu_type_id))
            .await
            .unwrap();

        let mut orders = OrderRepository::new(&mut conn);
        let order = orders
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();
        orders.add_item(order.id, first.id).await.unwrap();
        orders.add_item(order.id, second.id).await.unwrap();

        let err = orders.recalculate_price(order.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::AmountOverflow { .. })
        ));
        assert_eq!(
            orders.get_by_id(order.id).await.unwrap().unwrap().price_cents,
            0
        );
    }

    #[tokio::test]
    async fn test_delete_policies_around_orders() {
        let db = database().await;
        let f = fixture(&db).await;
        let mut conn = db.acquire().await.unwrap();

        let order = OrderRepository::new(&mut conn)
            .insert(&NewOrder::active(f.table_id, f.server_id))
            .await
            .unwrap();
        OrderRepository::new(&mut conn)
            .add_item(order.id, f.fries_id)
            .await
            .unwrap();

        // Referenced rows are restricted
        assert!(matches!(
            TableRepository::new(&mut conn).delete(f.table_id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
        assert!(matches!(
            EmployeeRepository::new(&mut conn).delete(f.server_id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
        assert!(matches!(
            MenuItemRepository::new(&mut conn).delete(f.fries_id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
        assert_eq!(
            MenuItemRepository::new(&mut conn)
                .orders(f.fries_id)
                .await
                .unwrap()
                .len(),
            1
        );

        // Deleting the order cascades to its link rows
        OrderRepository::new(&mut conn).delete(order.id).await.unwrap();
        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_details")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(links, 0);

        MenuItemRepository::new(&mut conn).delete(f.fries_id).await.unwrap();
        TableRepository::new(&mut conn).delete(f.table_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_order_requires_existing_table_and_server() {
        let db = database().await;
        let mut conn = db.acquire().await.unwrap();

        let err = OrderRepository::new(&mut conn)
            .insert(&NewOrder::active(99, 99))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
