use crate::seed::Seeder;
use common::students::{AttendanceInput, CreateStudentRequest, MarkInput};
use fake::{
    Fake,
    faker::address::en::{CityName, StreetName},
    faker::name::en::{FirstName, LastName},
};
use sea_orm::DatabaseConnection;
use services::{StudentError, student_service::StudentService};

const DEPARTMENTS: &[(&str, &str)] = &[
    ("Computer Science", "CS"),
    ("Information Technology", "IT"),
    ("Electronics", "EC"),
    ("Mechanical", "ME"),
    ("Civil", "CE"),
    ("Electrical", "EE"),
];
const SECTIONS: &[&str] = &["A", "B", "C", "D"];
const SUBJECTS: &[&str] = &["Mathematics", "Physics", "Chemistry", "Programming", "English"];

/// Fake students, created through the service so each gets its login account.
pub struct DemoStudentSeeder {
    pub count: usize,
}

fn demo_student(index: usize) -> CreateStudentRequest {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let (department, code) = DEPARTMENTS[index % DEPARTMENTS.len()];
    let roll_no = format!("{code}{:03}", index + 1);

    let mut local: String = first
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if local.is_empty() {
        local.push_str("student");
    }

    let total = fastrand::i64(20..=60);
    let marks = SUBJECTS
        .iter()
        .take(fastrand::usize(2..=SUBJECTS.len()))
        .map(|subject| MarkInput {
            subject: Some((*subject).to_string()),
            score: Some(fastrand::u8(35..=100) as f64),
        })
        .collect();

    CreateStudentRequest {
        name: Some(format!("{first} {last}")),
        roll_no: Some(roll_no.clone()),
        email: Some(format!("{local}.{}@college.edu", roll_no.to_lowercase())),
        department: Some(department.to_string()),
        year: Some(fastrand::i64(1..=4)),
        section: Some(SECTIONS[fastrand::usize(..SECTIONS.len())].to_string()),
        phone: Some(format!("9{:09}", fastrand::u32(..1_000_000_000))),
        address: Some(format!("{} {street}, {city}", fastrand::u16(1..500))),
        attendance: Some(AttendanceInput {
            present: fastrand::i64(0..=total),
            total,
        }),
        marks: Some(marks),
        profile_photo: None,
    }
}

#[async_trait::async_trait]
impl Seeder for DemoStudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), String> {
        for index in 0..self.count {
            match StudentService::create(db, demo_student(index)).await {
                Ok(_) => {}
                // Re-running the seeder hits the roll numbers it created last time.
                Err(StudentError::Conflict(_)) => continue,
                Err(e) => return Err(format!("Error creating demo student: {e}")),
            }
        }
        Ok(())
    }
}
