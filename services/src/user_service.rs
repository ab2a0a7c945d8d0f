use crate::error::StudentError;
use chrono::Utc;
use db::models::student::Model as StudentModel;
use db::models::user::{ActiveModel as UserActiveModel, Model as UserModel, Role};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use util::config;

pub struct UserService;

impl UserService {
    /// Returns the account when `email` and `password` match, `None` otherwise.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<Option<UserModel>, DbErr> {
        let email = email.trim();

        if let Some(user) = UserModel::find_by_email(db, email).await? {
            if user.verify_password(password) {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    /// Creates the `student` login for a freshly created student, using the
    /// configured temporary password.
    pub async fn create_student_account(
        db: &DatabaseConnection,
        student: &StudentModel,
    ) -> Result<UserModel, StudentError> {
        let account = UserModel::create(
            db,
            &student.email,
            &config::student_temp_password(),
            Role::Student,
            Some(student.id),
        )
        .await?;

        tracing::info!(user_id = account.id, student_id = student.id, "student account created");
        Ok(account)
    }

    /// Keeps a student's login email equal to the record's email.
    pub async fn sync_account_email(
        db: &DatabaseConnection,
        student_id: i64,
        email: &str,
    ) -> Result<(), StudentError> {
        let Some(account) = UserModel::find_by_student_id(db, student_id).await? else {
            tracing::warn!(student_id, "student has no account to update");
            return Ok(());
        };

        let mut am: UserActiveModel = account.into();
        am.email = Set(email.to_owned());
        am.updated_at = Set(Utc::now());
        am.update(db).await?;
        Ok(())
    }

    /// Replaces the admin account: removes whatever holds `email`, recreates it
    /// with `password`, then reads it back and checks the stored hash.
    pub async fn reset_admin(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<UserModel, DbErr> {
        UserModel::delete_by_email(db, email).await?;
        UserModel::create(db, email, password, Role::Admin, None).await?;

        let stored = UserModel::find_by_email(db, email)
            .await?
            .ok_or_else(|| DbErr::Custom("User was not created properly".into()))?;

        if !stored.verify_password(password) {
            return Err(DbErr::Custom("Password was not hashed properly".into()));
        }

        tracing::info!(user_id = stored.id, email, "admin account ready");
        Ok(stored)
    }
}
