use super::FormMode;
use super::fields::{Field, FormData};
use common::validation::{EMAIL_REGEX, PHONE_REGEX};
use std::collections::BTreeMap;

pub type FieldErrors = BTreeMap<Field, String>;

fn required_message(field: Field) -> &'static str {
    match field {
        Field::Name => "Name is required",
        Field::RollNo => "Roll Number is required",
        Field::Email => "Email is required",
        Field::Department => "Department is required",
        Field::Year => "Year is required",
        Field::Section => "Section is required",
        Field::Phone => "Phone number is required",
        Field::Address => "Address is required",
    }
}

fn format_error(field: Field, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    match field {
        Field::Email if !EMAIL_REGEX.is_match(value) => Some("Invalid email format"),
        Field::Phone if !PHONE_REGEX.is_match(value) => Some("Invalid phone number (10 digits required)"),
        Field::Year if !matches!(value.trim().parse::<i64>(), Ok(1..=4)) => {
            Some("Year must be between 1 and 4")
        }
        _ => None,
    }
}

/// Field-level errors for `data`.
///
/// Create checks every field and requires all of them. Edit checks only the
/// `changed` fields and requires nothing except a year, which has no empty
/// form on the wire. View never reports errors.
pub fn validate(mode: FormMode, data: &FormData, changed: &[Field]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let checked: &[Field] = match mode {
        FormMode::View => return errors,
        FormMode::Create => &Field::ALL,
        FormMode::Edit => changed,
    };

    for &field in checked {
        if let Some(message) = format_error(field, data.get(field)) {
            errors.insert(field, message.to_string());
        }
    }

    let required: &[Field] = match mode {
        FormMode::Create => &Field::ALL,
        _ if checked.contains(&Field::Year) => &[Field::Year],
        _ => &[],
    };
    for &field in required {
        if data.get(field).trim().is_empty() {
            errors.insert(field, required_message(field).to_string());
        }
    }

    errors
}
