use std::{fs, path::Path};
use util::{config, paths};

mod runner;

#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    if db_path.is_empty() {
        eprintln!("DATABASE_PATH is not set");
        std::process::exit(1);
    }
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            migrate(&url).await;
        }
        _ => {
            create_db_dir(&db_path);
            migrate(&url).await;
        }
    }
}

async fn migrate(url: &str) {
    match runner::run_all_migrations(url).await {
        Ok(count) => println!("Schema ready ({count} migrations)"),
        Err(e) => {
            eprintln!("Migration failed: {e}");
            std::process::exit(1);
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        exit_on_err(fs::remove_file(db_path), "delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }

    // Uploaded profile photos belong to rows that no longer exist
    let students_root = paths::storage_root().join("students");
    if students_root.exists() {
        exit_on_err(fs::remove_dir_all(&students_root), "delete student uploads");
        println!("Deleted student uploads: {}", students_root.display());
    }
}

fn create_db_dir(path: &str) {
    exit_on_err(paths::ensure_parent_dir(path), "create DB directory");
}

fn exit_on_err(result: std::io::Result<()>, action: &str) {
    if let Err(e) = result {
        eprintln!("Failed to {action}: {e}");
        std::process::exit(1);
    }
}
