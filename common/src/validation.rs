use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationErrors, ValidationErrorsKind};

/// `local@domain.tld` with optional `.`/`-` separated segments and a 2-3 letter suffix.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

/// Exactly ten digits.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("phone pattern compiles"));

/// Declaration order of student fields; errors are reported in this order.
const FIELD_ORDER: &[&str] = &[
    "name",
    "roll_no",
    "email",
    "department",
    "year",
    "section",
    "phone",
    "address",
    "attendance",
    "marks",
    "profile_photo",
];

/// One rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Reduces `roll_no`, `rollNo` and `marks[0].score` alike to a comparable root name.
fn normalized_root(field: &str) -> String {
    field
        .split(['.', '['])
        .next()
        .unwrap_or(field)
        .replace('_', "")
        .to_lowercase()
}

fn field_rank(field: &str) -> usize {
    let root = normalized_root(field);
    FIELD_ORDER
        .iter()
        .position(|f| normalized_root(f) == root)
        .unwrap_or(FIELD_ORDER.len())
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {path}"));
                    out.push(FieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(&format!("{path}[{idx}]"), inner, out);
                }
            }
        }
    }
}

/// Flattens (possibly nested) validation errors into a stable, ordered list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect("", errors, &mut out);
    out.sort_by(|a, b| {
        field_rank(&a.field)
            .cmp(&field_rank(&b.field))
            .then_with(|| a.field.cmp(&b.field))
    });
    out
}

/// Joins every validation message into one comma separated string.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    field_errors(errors)
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(", ")
}
