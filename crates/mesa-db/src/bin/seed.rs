//! # Seed Loader
//!
//! Wipes the configured database and loads the starting dataset.
//!
//! ## Usage
//! ```bash
//! # Uses DATABASE_URL from the environment or a .env file
//! DATABASE_URL=sqlite://mesa_dev.db?mode=rwc cargo run -p mesa-db --bin seed
//!
//! # More detail
//! RUST_LOG=mesa_db=debug cargo run -p mesa-db --bin seed
//! ```
//!
//! **Destructive**: every table is dropped and recreated on each run.

use mesa_db::{seed, Database, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mesa_db=info,seed=info".into()),
        )
        .init();

    // The seed resets the schema itself
    let config = DbConfig::from_env()?.run_migrations(false);
    let db = Database::new(config).await?;

    let report = seed::run(&db).await?;
    db.close().await;

    println!("Seed complete");
    println!("  Employees:       {}", report.employees);
    println!("  Menu item types: {}", report.menu_item_types);
    println!("  Menus:           {}", report.menus);
    println!("  Menu items:      {}", report.menu_items);
    println!("  Tables:          {}", report.tables);

    Ok(())
}
