pub mod students;
pub mod validation;

pub use validation::{FieldError, field_errors, format_validation_errors};
