//! # Seed Loader
//!
//! Resets the schema and loads the fixed starting dataset.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          seed::run(&db)                                 │
//! │                                                                         │
//! │  reset_schema()            drop everything, re-run migrations          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tx: staff                 Margot #1234                                │
//! │       │  commit                                                        │
//! │       ▼                                                                 │
//! │  tx: menu                  Beverages, Entrees, Sides                   │
//! │       │                    Dinner: French fries, Dr. Pepper, Jambalaya │
//! │       │  commit                                                        │
//! │       ▼                                                                 │
//! │  tx: floor                 tables 1..=10                               │
//! │       │  commit                                                        │
//! │       ▼                                                                 │
//! │  SeedReport                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failure aborts the run. Groups committed before it stay.

use mesa_core::{Money, NewEmployee, NewMenu, NewMenuItem, NewMenuItemType, NewTable};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{
    EmployeeRepository, MenuItemRepository, MenuItemTypeRepository, MenuRepository,
    TableRepository,
};

// =============================================================================
// Dataset
// =============================================================================

/// (name, employee number, password)
const EMPLOYEES: &[(&str, i64, &str)] = &[("Margot", 1234, "password")];

const MENU_ITEM_TYPES: &[&str] = &["Beverages", "Entrees", "Sides"];

const MENU: &str = "Dinner";

/// (name, price in cents, type name)
const MENU_ITEMS: &[(&str, i64, &str)] = &[
    ("French fries", 350, "Sides"),
    ("Dr. Pepper", 100, "Beverages"),
    ("Jambalaya", 2198, "Entrees"),
];

/// Capacity of tables 1 through 10, in order.
const TABLE_CAPACITIES: [i64; 10] = [2, 2, 3, 4, 6, 7, 8, 10, 11, 12];

// =============================================================================
// Report
// =============================================================================

/// Row counts inserted by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub employees: usize,
    pub menu_item_types: usize,
    pub menus: usize,
    pub menu_items: usize,
    pub tables: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.employees + self.menu_item_types + self.menus + self.menu_items + self.tables
    }
}

// =============================================================================
// Run
// =============================================================================

/// Drops all data and loads the starting dataset.
pub async fn run(db: &Database) -> DbResult<SeedReport> {
    info!("Resetting schema");
    db.reset_schema().await?;

    let mut report = SeedReport::default();

    seed_employees(db, &mut report).await?;
    seed_menu(db, &mut report).await?;
    seed_tables(db, &mut report).await?;

    info!(
        employees = report.employees,
        menu_item_types = report.menu_item_types,
        menus = report.menus,
        menu_items = report.menu_items,
        tables = report.tables,
        "Seed complete"
    );

    Ok(report)
}

async fn seed_employees(db: &Database, report: &mut SeedReport) -> DbResult<()> {
    let mut tx = db.begin().await?;
    let mut employees = EmployeeRepository::new(&mut tx);

    for &(name, number, password) in EMPLOYEES {
        employees
            .insert(&NewEmployee::new(name, number, password)?)
            .await?;
        report.employees += 1;
    }

    tx.commit().await?;
    info!(count = report.employees, "Employees seeded");
    Ok(())
}

async fn seed_menu(db: &Database, report: &mut SeedReport) -> DbResult<()> {
    let mut tx = db.begin().await?;

    let mut types = Vec::with_capacity(MENU_ITEM_TYPES.len());
    for &name in MENU_ITEM_TYPES {
        let item_type = MenuItemTypeRepository::new(&mut tx)
            .insert(&NewMenuItemType::new(name))
            .await?;
        types.push(item_type);
        report.menu_item_types += 1;
    }

    let menu = MenuRepository::new(&mut tx)
        .insert(&NewMenu::new(MENU))
        .await?;
    report.menus += 1;

    for &(name, price_cents, type_name) in MENU_ITEMS {
        let item_type = types
            .iter()
            .find(|t| t.name == type_name)
            .ok_or_else(|| DbError::not_found("MenuItemType", type_name))?;

        MenuItemRepository::new(&mut tx)
            .insert(&NewMenuItem::new(
                name,
                Money::from_cents(price_cents),
                menu.id,
                item_type.id,
            ))
            .await?;
        report.menu_items += 1;
    }

    tx.commit().await?;
    info!(
        menu_item_types = report.menu_item_types,
        menu_items = report.menu_items,
        "Menu seeded"
    );
    Ok(())
}

async fn seed_tables(db: &Database, report: &mut SeedReport) -> DbResult<()> {
    let mut tx = db.begin().await?;
    let mut tables = TableRepository::new(&mut tx);

    for (number, capacity) in (1..).zip(TABLE_CAPACITIES) {
        tables.insert(&NewTable::new(number, capacity)).await?;
        report.tables += 1;
    }

    tx.commit().await?;
    info!(count = report.tables, "Tables seeded");
    Ok(())
}
