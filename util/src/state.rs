use sea_orm::DatabaseConnection;

/// Shared handler state. Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The student and account store.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
