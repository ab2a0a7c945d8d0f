use crate::seed::Seeder;
use sea_orm::DatabaseConnection;
use services::user_service::UserService;

/// Recreates the admin login from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
pub struct AdminSeeder {
    pub email: String,
    pub password: String,
}

#[async_trait::async_trait]
impl Seeder for AdminSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), String> {
        UserService::reset_admin(db, &self.email, &self.password)
            .await
            .map(|_| ())
            .map_err(|e| format!("Error creating admin user: {e}"))
    }
}
