pub mod m202510190001_create_students;
pub mod m202510190002_create_users;
