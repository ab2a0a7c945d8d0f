//! Client side of the student records service: the typed HTTP client, the
//! student form as a headless state model, and the client route table.

pub mod api;
pub mod form;
pub mod routes;

pub use api::{ClientError, HttpStudentsApi, StudentsApi};
pub use form::{FormMode, Navigation, Notice, StudentForm, SubmitOutcome};
pub use routes::{ClientRoute, Resolved};
