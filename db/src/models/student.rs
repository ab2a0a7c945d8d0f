use chrono::{DateTime, Utc};
use common::students::{Attendance, Derived, Mark, StudentRecord, average_marks};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, FromJsonQueryResult, QueryOrder};
use serde::{Deserialize, Serialize};

/// Represents a student in the `students` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique roll number.
    #[sea_orm(unique)]
    pub roll_no: String,
    /// Unique email address, mirrored by the student's account.
    #[sea_orm(unique)]
    pub email: String,
    pub department: String,
    /// Year of study, 1 through 4.
    pub year: i64,
    pub section: String,
    pub phone: String,
    pub address: String,
    pub attendance_present: i64,
    pub attendance_total: i64,
    /// Ordered subject scores, stored as a JSON array.
    #[sea_orm(column_type = "Json")]
    pub marks: Marks,
    /// Stored filename of the profile photo.
    pub profile_photo: String,
    /// Set once on insert.
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Marks(pub Vec<Mark>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    Account,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn attendance(&self) -> Attendance {
        Attendance {
            present: self.attendance_present,
            total: self.attendance_total,
        }
    }

    pub fn attendance_percentage(&self) -> Derived {
        self.attendance().percentage()
    }

    pub fn average_marks(&self) -> Derived {
        average_marks(&self.marks.0)
    }

    /// Every student, oldest first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Students whose email or roll number matches either value, in one query.
    pub async fn find_by_email_or_roll_no(
        db: &DbConn,
        email: &str,
        roll_no: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(email))
                    .add(Column::RollNo.eq(roll_no)),
            )
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}

impl From<Model> for StudentRecord {
    fn from(model: Model) -> Self {
        let attendance_percentage = model.attendance_percentage();
        let average_marks = model.average_marks();
        Self {
            id: model.id,
            name: model.name,
            roll_no: model.roll_no,
            email: model.email,
            department: model.department,
            year: model.year,
            section: model.section,
            phone: model.phone,
            address: model.address,
            attendance: Attendance {
                present: model.attendance_present,
                total: model.attendance_total,
            },
            marks: model.marks.0,
            profile_photo: model.profile_photo,
            created_at: model.created_at,
            attendance_percentage,
            average_marks,
        }
    }
}
