use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::student_service::Caller;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    /// Linked student record; only set for `student` accounts.
    pub student_id: Option<i64>,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The identity the student service checks ownership against.
    pub fn caller(&self) -> Caller {
        Caller {
            role: self.role,
            student_id: self.student_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
