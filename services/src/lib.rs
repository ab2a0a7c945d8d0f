pub mod error;
pub mod service;
pub mod student_service;
pub mod user_service;

pub use error::StudentError;
