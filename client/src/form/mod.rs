//! The student form: one component, three modes.
//!
//! [`StudentForm`] holds the form state and decides what a renderer shows and
//! what gets sent. Create requires every field, Edit sends only what changed
//! since the record was loaded, and View is read-only with a single `Back`
//! action. These checks mirror the server's rules for quicker feedback; the
//! server remains the one that enforces them.

pub mod fields;
pub mod validate;

use crate::api::{ClientError, StudentsApi};
use common::students::{CreateStudentRequest, UpdateStudentRequest};
use fields::{Field, FieldView, FormData};
use validate::{FieldErrors, validate};

/// Where the form goes after a successful save or a cancel.
pub const STUDENTS_PATH: &str = "/students";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn from_failure(err: &ClientError) -> Self {
        Self::error(err.server_message().unwrap_or("Something went wrong"))
    }
}

/// Leave the form for `to`, showing `notice` on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved.
    Navigate(Navigation),
    /// Nothing was sent. Field errors, if any, are on the form.
    Blocked(Option<Notice>),
    /// The server refused the request; the form stays open.
    Failed(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leaves for the list without saving.
    Back,
    Cancel,
    Submit,
}

/// A button as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub action: Action,
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct StudentForm {
    mode: FormMode,
    id: Option<i64>,
    data: FormData,
    initial: Option<FormData>,
    errors: FieldErrors,
    submitting: bool,
}

impl StudentForm {
    /// An empty form for a new student.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            id: None,
            data: FormData::default(),
            initial: None,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// Loads student `id` into an Edit or View form.
    ///
    /// Any failure sends the user back to the list with
    /// `Failed to fetch student details`.
    pub async fn open<A>(api: &A, mode: FormMode, id: i64) -> Result<Self, Navigation>
    where
        A: StudentsApi + ?Sized,
    {
        match api.get_student(id).await {
            Ok(record) => {
                let data = FormData::from(&record);
                Ok(Self {
                    mode,
                    id: Some(id),
                    initial: Some(data.clone()),
                    data,
                    errors: FieldErrors::new(),
                    submitting: false,
                })
            }
            Err(e) => {
                tracing::warn!(student_id = id, error = %e, "failed to load student");
                Err(Navigation {
                    to: STUDENTS_PATH.to_string(),
                    notice: Notice::error("Failed to fetch student details"),
                })
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Student",
            FormMode::Edit => "Edit Student",
            FormMode::View => "View Student",
        }
    }

    fn is_disabled(&self, field: Field) -> bool {
        match self.mode {
            FormMode::View => true,
            FormMode::Edit => field == Field::RollNo,
            FormMode::Create => false,
        }
    }

    /// Updates one value. Disabled fields keep their value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if !self.is_disabled(field) {
            self.data.set(field, value);
        }
    }

    /// Fields whose value differs from the loaded record. Empty outside Edit.
    pub fn modified_fields(&self) -> Vec<Field> {
        let Some(initial) = &self.initial else {
            return Vec::new();
        };
        if self.mode != FormMode::Edit {
            return Vec::new();
        }
        Field::ALL
            .into_iter()
            .filter(|&f| self.data.get(f) != initial.get(f))
            .collect()
    }

    pub fn fields(&self) -> Vec<FieldView> {
        Field::ALL
            .into_iter()
            .map(|field| {
                // name, roll number and email drop the marker while editing
                let starred = match field {
                    Field::Name | Field::RollNo | Field::Email => self.mode != FormMode::Edit,
                    _ => true,
                };
                FieldView {
                    field,
                    label: if starred {
                        format!("{} *", field.label())
                    } else {
                        field.label().to_string()
                    },
                    input: field.input(),
                    value: self.data.get(field).to_string(),
                    disabled: self.is_disabled(field),
                    placeholder: field.placeholder(),
                    error: self.errors.get(&field).cloned(),
                }
            })
            .collect()
    }

    pub fn actions(&self) -> Vec<ActionView> {
        match self.mode {
            FormMode::View => vec![ActionView {
                action: Action::Back,
                label: "Back",
                disabled: false,
            }],
            FormMode::Create | FormMode::Edit => vec![
                ActionView {
                    action: Action::Cancel,
                    label: "Cancel",
                    disabled: self.submitting,
                },
                ActionView {
                    action: Action::Submit,
                    label: match (self.submitting, self.mode) {
                        (true, _) => "Saving...",
                        (false, FormMode::Edit) => "Update",
                        _ => "Create",
                    },
                    disabled: self.submitting,
                },
            ],
        }
    }

    fn create_body(&self) -> CreateStudentRequest {
        let d = &self.data;
        CreateStudentRequest {
            name: Some(d.name.clone()),
            roll_no: Some(d.roll_no.clone()),
            email: Some(d.email.clone()),
            department: Some(d.department.clone()),
            year: d.year.trim().parse().ok(),
            section: Some(d.section.clone()),
            phone: Some(d.phone.clone()),
            address: Some(d.address.clone()),
            ..Default::default()
        }
    }

    fn update_body(&self, changed: &[Field]) -> UpdateStudentRequest {
        let mut body = UpdateStudentRequest::default();
        for &field in changed {
            let value = self.data.get(field).to_string();
            match field {
                Field::Name => body.name = Some(value),
                Field::RollNo => body.roll_no = Some(value),
                Field::Email => body.email = Some(value),
                Field::Department => body.department = Some(value),
                Field::Year => body.year = value.trim().parse().ok(),
                Field::Section => body.section = Some(value),
                Field::Phone => body.phone = Some(value),
                Field::Address => body.address = Some(value),
            }
        }
        body
    }

    /// Validates and, when allowed, sends the form.
    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: StudentsApi + ?Sized,
    {
        if self.submitting {
            return SubmitOutcome::Blocked(None);
        }

        let changed = match self.mode {
            FormMode::View => return SubmitOutcome::Blocked(None),
            FormMode::Create => Vec::new(),
            FormMode::Edit => {
                let changed = self.modified_fields();
                if changed.is_empty() {
                    return SubmitOutcome::Blocked(Some(Notice::error("No changes made")));
                }
                changed
            }
        };

        self.errors = validate(self.mode, &self.data, &changed);
        if !self.errors.is_empty() {
            return SubmitOutcome::Blocked(None);
        }

        self.submitting = true;
        let result = match (self.mode, self.id) {
            (FormMode::Edit, Some(id)) => api
                .update_student(id, &self.update_body(&changed))
                .await
                .map(|_| "Student updated successfully"),
            _ => api
                .create_student(&self.create_body())
                .await
                .map(|_| "Student created successfully"),
        };
        self.submitting = false;

        match result {
            Ok(message) => SubmitOutcome::Navigate(Navigation {
                to: STUDENTS_PATH.to_string(),
                notice: Notice::success(message),
            }),
            Err(e) => SubmitOutcome::Failed(Notice::from_failure(&e)),
        }
    }
}
