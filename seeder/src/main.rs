use crate::seed::{Seeder, run_seeder};
use crate::seeds::{admin::AdminSeeder, student::DemoStudentSeeder};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use util::config;

mod seed;
mod seeds;

const DEMO_STUDENTS: usize = 12;

#[tokio::main]
async fn main() {
    if config::database_path().is_empty() {
        eprintln!("DATABASE_PATH is not set");
        std::process::exit(1);
    }

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Failed to apply migrations: {e}");
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().collect();
    let demo = args.get(1).map(String::as_str) == Some("demo");

    let mut seeders: Vec<(Box<dyn Seeder + Send + Sync>, &str)> = vec![(
        Box::new(AdminSeeder {
            email: config::admin_email(),
            password: config::admin_password(),
        }),
        "Admin",
    )];
    if demo {
        seeders.push((Box::new(DemoStudentSeeder { count: DEMO_STUDENTS }), "Students"));
    }

    for (seeder, name) in seeders {
        run_seeder(&*seeder, name, &db).await;
    }

    println!("Admin login: {}", config::admin_email());
}
