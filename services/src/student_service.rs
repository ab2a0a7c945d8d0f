//! Student records and the login account each one carries.
//!
//! Every operation is a short, strictly sequential run of datastore calls with
//! no transaction around it. Uniqueness is pre-checked with one query and
//! backed by unique indexes, so a racing insert surfaces as the same
//! `Conflict` the pre-check would have produced.

use crate::error::StudentError;
use crate::service::ToActiveModel;
use crate::user_service::UserService;
use chrono::Utc;
use common::format_validation_errors;
use common::students::{
    CreateStudentRequest, DEFAULT_PROFILE_PHOTO, MarkInput, UpdateStudentRequest,
};
use db::models::student::{self, ActiveModel, Entity as StudentEntity, Marks, Model as StudentModel};
use db::models::user::{Model as UserModel, Role};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use util::paths;
use validator::Validate;

/// Largest accepted profile photo, in bytes.
pub const MAX_PHOTO_SIZE: usize = 2 * 1024 * 1024;
const ALLOWED_MIME: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Who is asking: enough of the authenticated identity to apply the ownership rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub role: Role,
    pub student_id: Option<i64>,
}

impl Caller {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            student_id: None,
        }
    }

    pub fn student(student_id: i64) -> Self {
        Self {
            role: Role::Student,
            student_id: Some(student_id),
        }
    }

    /// Admins see everyone; students see only the record their account links to.
    pub fn may_view(&self, student_id: i64) -> bool {
        self.role == Role::Admin || self.student_id == Some(student_id)
    }
}

/// A profile photo received with an update.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ToActiveModel<student::Entity> for CreateStudentRequest {
    fn into_active_model(self) -> ActiveModel {
        let attendance = self.attendance.unwrap_or_default();
        let marks = self
            .marks
            .unwrap_or_default()
            .into_iter()
            .map(MarkInput::into_mark)
            .collect();

        ActiveModel {
            id: NotSet,
            name: Set(self.name.unwrap_or_default()),
            roll_no: Set(self.roll_no.unwrap_or_default()),
            email: Set(self.email.unwrap_or_default()),
            department: Set(self.department.unwrap_or_default()),
            year: Set(self.year.unwrap_or_default()),
            section: Set(self.section.unwrap_or_default()),
            phone: Set(self.phone.unwrap_or_default()),
            address: Set(self.address.unwrap_or_default()),
            attendance_present: Set(attendance.present),
            attendance_total: Set(attendance.total),
            marks: Set(Marks(marks)),
            profile_photo: Set(self
                .profile_photo
                .unwrap_or_else(|| DEFAULT_PROFILE_PHOTO.to_string())),
            created_at: Set(Utc::now()),
        }
    }
}

/// A partial update addressed to one student.
#[derive(Debug, Clone)]
pub struct StudentChanges {
    pub id: i64,
    pub changes: UpdateStudentRequest,
}

impl ToActiveModel<student::Entity> for StudentChanges {
    fn into_active_model(self) -> ActiveModel {
        let c = self.changes;
        let mut am = ActiveModel {
            id: Set(self.id),
            ..Default::default()
        };

        if let Some(name) = c.name {
            am.name = Set(name);
        }
        if let Some(roll_no) = c.roll_no {
            am.roll_no = Set(roll_no);
        }
        if let Some(email) = c.email {
            am.email = Set(email);
        }
        if let Some(department) = c.department {
            am.department = Set(department);
        }
        if let Some(year) = c.year {
            am.year = Set(year);
        }
        if let Some(section) = c.section {
            am.section = Set(section);
        }
        if let Some(phone) = c.phone {
            am.phone = Set(phone);
        }
        if let Some(address) = c.address {
            am.address = Set(address);
        }
        if let Some(attendance) = c.attendance {
            am.attendance_present = Set(attendance.present);
            am.attendance_total = Set(attendance.total);
        }
        if let Some(marks) = c.marks {
            am.marks = Set(Marks(marks.into_iter().map(MarkInput::into_mark).collect()));
        }
        if let Some(photo) = c.profile_photo {
            am.profile_photo = Set(photo);
        }

        am
    }
}

/// Picks the conflict message for an existing match. An email hit wins over a
/// roll number hit, whichever record was found first.
fn collision_message(existing: &[StudentModel], email: &str) -> Option<&'static str> {
    if existing.iter().any(|s| s.email == email) {
        Some("Email already exists")
    } else if !existing.is_empty() {
        Some("Roll number already exists")
    } else {
        None
    }
}

pub struct StudentService;

impl StudentService {
    /// Every student record. No paging, filtering or sorting beyond insertion order.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<StudentModel>, StudentError> {
        Ok(StudentModel::list(db).await?)
    }

    pub async fn find(db: &DatabaseConnection, id: i64) -> Result<StudentModel, StudentError> {
        StudentEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StudentError::NotFound)
    }

    /// Fetches one record on behalf of `caller`. Existence is checked before ownership.
    pub async fn get_for(
        db: &DatabaseConnection,
        id: i64,
        caller: &Caller,
    ) -> Result<StudentModel, StudentError> {
        let student = Self::find(db, id).await?;
        if !caller.may_view(student.id) {
            tracing::warn!(student_id = id, caller = ?caller, "ownership check failed");
            return Err(StudentError::Forbidden);
        }
        Ok(student)
    }

    /// Creates a student and then its `student` account with the temporary password.
    ///
    /// If the account cannot be created the student row is removed again, so a
    /// record never outlives a failed create without its account.
    pub async fn create(
        db: &DatabaseConnection,
        req: CreateStudentRequest,
    ) -> Result<StudentModel, StudentError> {
        req.validate()
            .map_err(|e| StudentError::Validation(format_validation_errors(&e)))?;

        let email = req.email.clone().unwrap_or_default();
        let roll_no = req.roll_no.clone().unwrap_or_default();

        // Racy by construction; the unique indexes catch what slips past.
        let existing = StudentModel::find_by_email_or_roll_no(db, &email, &roll_no).await?;
        if let Some(msg) = collision_message(&existing, &email) {
            return Err(StudentError::Conflict(msg.to_string()));
        }

        let student = req.into_active_model().insert(db).await?;

        if let Err(e) = UserService::create_student_account(db, &student).await {
            tracing::error!(student_id = student.id, error = %e, "account creation failed, removing student");
            if let Err(cleanup) = StudentEntity::delete_by_id(student.id).exec(db).await {
                tracing::error!(student_id = student.id, error = %cleanup, "failed to remove student without account");
            }
            return Err(e);
        }

        tracing::info!(student_id = student.id, roll_no = %student.roll_no, "student created");
        Ok(student)
    }

    /// Applies the fields present in `changes`, plus an optional new photo.
    ///
    /// A new email must not belong to another login. If the row is written but
    /// the login cannot follow, the row is put back as it was. A replaced photo
    /// is removed from disk; a photo stored for a failed update is removed too.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        mut changes: UpdateStudentRequest,
        photo: Option<PhotoUpload>,
    ) -> Result<StudentModel, StudentError> {
        let current = Self::find(db, id).await?;

        changes
            .validate()
            .map_err(|e| StudentError::Validation(format_validation_errors(&e)))?;

        let new_email = changes.email.clone().filter(|e| *e != current.email);
        if let Some(email) = &new_email {
            if let Some(holder) = UserModel::find_by_email(db, email).await? {
                if holder.student_id != Some(id) {
                    return Err(StudentError::Conflict("Email already exists".into()));
                }
            }
        }

        let stored_photo = match photo {
            Some(photo) => {
                let filename = Self::store_profile_photo(id, photo).await?;
                changes.profile_photo = Some(filename.clone());
                Some(filename)
            }
            None => None,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        let updated = match (StudentChanges { id, changes })
            .into_active_model()
            .update(db)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(filename) = &stored_photo {
                    Self::discard_photo(id, filename).await;
                }
                return Err(e.into());
            }
        };

        if let Some(email) = new_email {
            if let Err(e) = UserService::sync_account_email(db, id, &email).await {
                tracing::error!(student_id = id, error = %e, "account email sync failed, restoring student");
                if let Err(restore) = ActiveModel::from(current.clone()).reset_all().update(db).await {
                    tracing::error!(student_id = id, error = %restore, "failed to restore student");
                }
                if let Some(filename) = &stored_photo {
                    Self::discard_photo(id, filename).await;
                }
                return Err(e);
            }
        }

        if let Some(filename) = &stored_photo {
            if current.profile_photo != DEFAULT_PROFILE_PHOTO && current.profile_photo != *filename {
                Self::discard_photo(id, &current.profile_photo).await;
            }
        }

        tracing::info!(student_id = id, "student updated");
        Ok(updated)
    }

    /// Deletes the student's account, then the student.
    ///
    /// Both deletes are attempted even if the first fails; the first error is returned.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), StudentError> {
        let student = Self::find(db, id).await?;

        let account = UserModel::delete_by_student_id(db, student.id).await;
        let record = StudentEntity::delete_by_id(student.id).exec(db).await;

        match (account, record) {
            (Ok(acc), Ok(_)) => {
                tracing::info!(
                    student_id = id,
                    accounts_removed = acc.rows_affected,
                    "student deleted"
                );
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(student_id = id, error = %e, "student delete failed");
                Err(e.into())
            }
        }
    }

    /// Writes an uploaded photo under the student's storage folder and returns its filename.
    pub async fn store_profile_photo(
        student_id: i64,
        upload: PhotoUpload,
    ) -> Result<String, StudentError> {
        let ext = match upload.content_type.as_deref() {
            Some(ct) if ALLOWED_MIME.contains(&ct) => match ct {
                "image/png" => "png",
                "image/gif" => "gif",
                _ => "jpg",
            },
            _ => return Err(StudentError::Validation("File type not supported".into())),
        };

        if upload.bytes.len() > MAX_PHOTO_SIZE {
            return Err(StudentError::Validation("File too large".into()));
        }

        let dir = paths::student_dir(student_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StudentError::Storage(format!("Failed to store profile photo: {e}")))?;

        let filename = format!("photo_{}.{}", Utc::now().timestamp_millis(), ext);
        tokio::fs::write(dir.join(&filename), &upload.bytes)
            .await
            .map_err(|e| StudentError::Storage(format!("Failed to store profile photo: {e}")))?;

        tracing::info!(student_id, filename = %filename, "profile photo stored");
        Ok(filename)
    }

    async fn discard_photo(student_id: i64, filename: &str) {
        let path = paths::profile_photo_path(student_id, filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(student_id, path = %path.display(), error = %e, "could not remove profile photo");
        }
    }
}
