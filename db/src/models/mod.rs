pub mod student;
pub mod user;

pub use student::Entity as Student;
pub use user::Entity as User;
