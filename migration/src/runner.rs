use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// Applies the student and account tables in order, printing one status line
/// per migration. Stops at the first failure.
pub async fn run_all_migrations(url: &str) -> Result<usize, String> {
    let db = sea_orm::Database::connect(url)
        .await
        .map_err(|e| format!("Could not open {url}: {e}"))?;

    let schema_manager = SchemaManager::new(&db);
    let migrations = <migration::Migrator as MigratorTrait>::migrations();
    let total = migrations.len();

    println!("Creating tables ({total} migrations)...");
    for migration in migrations {
        apply(&schema_manager, migration).await?;
    }

    Ok(total)
}

async fn apply(schema_manager: &SchemaManager<'_>, migration: Box<dyn MigrationTrait>) -> Result<(), String> {
    let label = format!("Applying {}", migration.name().bold());
    print!("{label}{} ", ".".repeat(STATUS_COLUMN.saturating_sub(label.len())));
    io::stdout().flush().ok();

    let started = Instant::now();
    let outcome = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(())) => {
            println!("{} {}", "done".green(), format!("({:.2?})", started.elapsed()).dimmed());
            Ok(())
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            Err(format!("{}: {e}", migration.name()))
        }
        Err(_) => {
            println!("{}", "failed".red());
            Err(format!("{}: panicked", migration.name()))
        }
    }
}
