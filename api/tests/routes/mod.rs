mod auth_test;
mod health_test;
mod students;
