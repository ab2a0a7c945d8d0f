//! Student record shapes shared by the server and the client.
//!
//! The JSON field names are camelCase on the wire. Request bodies carry
//! `validator` rules; the record itself carries the derived
//! `attendancePercentage` and `averageMarks` values, which are computed
//! from the stored counters and never persisted.

use crate::validation::EMAIL_REGEX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

/// Filename used when a student has never uploaded a photo.
pub const DEFAULT_PROFILE_PHOTO: &str = "default.jpg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub present: i64,
    pub total: i64,
}

impl Attendance {
    pub fn percentage(&self) -> Derived {
        if self.total == 0 {
            return Derived::Zero;
        }
        Derived::fixed(self.present as f64 / self.total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub subject: String,
    pub score: f64,
}

/// Mean score across `marks`, or [`Derived::Zero`] when there are none.
pub fn average_marks(marks: &[Mark]) -> Derived {
    if marks.is_empty() {
        return Derived::Zero;
    }
    let total: f64 = marks.iter().map(|m| m.score).sum();
    Derived::fixed(total / marks.len() as f64)
}

/// A computed figure: the number `0` when there is nothing to compute from,
/// otherwise the value rendered with two decimals (`"75.00"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    Zero,
    Fixed(String),
}

impl Derived {
    fn fixed(value: f64) -> Self {
        Derived::Fixed(format!("{value:.2}"))
    }

    /// Numeric view of the value.
    pub fn as_f64(&self) -> f64 {
        match self {
            Derived::Zero => 0.0,
            Derived::Fixed(s) => s.parse().unwrap_or(0.0),
        }
    }
}

impl Serialize for Derived {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Derived::Zero => serializer.serialize_u8(0),
            Derived::Fixed(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Derived {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n == 0.0 => Derived::Zero,
            Raw::Number(n) => Derived::fixed(n),
            Raw::Text(s) => Derived::Fixed(s),
        })
    }
}

/// A student record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub department: String,
    pub year: i64,
    pub section: String,
    pub phone: String,
    pub address: String,
    pub attendance: Attendance,
    pub marks: Vec<Mark>,
    pub profile_photo: String,
    pub created_at: DateTime<Utc>,
    pub attendance_percentage: Derived,
    pub average_marks: Derived,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AttendanceInput {
    #[validate(range(min = 0, message = "Attendance counts cannot be negative"))]
    #[serde(default)]
    pub present: i64,
    #[validate(range(min = 0, message = "Attendance counts cannot be negative"))]
    #[serde(default)]
    pub total: i64,
}

impl From<AttendanceInput> for Attendance {
    fn from(input: AttendanceInput) -> Self {
        Attendance {
            present: input.present,
            total: input.total,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MarkInput {
    #[validate(
        required(message = "Subject is required"),
        length(min = 1, message = "Subject is required")
    )]
    pub subject: Option<String>,
    #[validate(
        required(message = "Score is required"),
        range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100")
    )]
    pub score: Option<f64>,
}

impl MarkInput {
    /// Converts a validated input into a stored mark.
    pub fn into_mark(self) -> Mark {
        Mark {
            subject: self.subject.unwrap_or_default(),
            score: self.score.unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/students`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(
        required(message = "Please add a name"),
        length(min = 1, message = "Please add a name")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Please add a roll number"),
        length(min = 1, message = "Please add a roll number")
    )]
    pub roll_no: Option<String>,

    #[validate(
        required(message = "Please add an email"),
        regex(path = *EMAIL_REGEX, message = "Please add a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Please add a department"),
        length(min = 1, message = "Please add a department")
    )]
    pub department: Option<String>,

    #[validate(
        required(message = "Please add a year"),
        range(min = 1, max = 4, message = "Year must be between 1 and 4")
    )]
    pub year: Option<i64>,

    #[validate(
        required(message = "Please add a section"),
        length(min = 1, message = "Please add a section")
    )]
    pub section: Option<String>,

    #[validate(
        required(message = "Please add a phone number"),
        length(min = 1, message = "Please add a phone number")
    )]
    pub phone: Option<String>,

    #[validate(
        required(message = "Please add an address"),
        length(min = 1, message = "Please add an address")
    )]
    pub address: Option<String>,

    #[validate(nested)]
    pub attendance: Option<AttendanceInput>,

    #[validate(nested)]
    pub marks: Option<Vec<MarkInput>>,

    pub profile_photo: Option<String>,
}

/// Body of `PUT /api/students/{id}`. Only the fields present are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "Please add a name"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Please add a roll number"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,

    #[validate(regex(path = *EMAIL_REGEX, message = "Please add a valid email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Please add a department"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,

    #[validate(length(min = 1, message = "Please add a section"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[validate(length(min = 1, message = "Please add a phone number"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Please add an address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceInput>,

    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<MarkInput>>,

    #[validate(length(min = 1, message = "Profile photo filename cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl UpdateStudentRequest {
    /// True when the body names no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.roll_no.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.year.is_none()
            && self.section.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.attendance.is_none()
            && self.marks.is_none()
            && self.profile_photo.is_none()
    }
}
