//! Client-side route table.
//!
//! | Path                  | Screen             |
//! |-----------------------|--------------------|
//! | `/login`              | Login              |
//! | `/students`           | Student list       |
//! | `/students/new`       | Form, create mode  |
//! | `/students/{id}`      | Form, view mode    |
//! | `/students/{id}/edit` | Form, edit mode    |
//!
//! `/` redirects to `/login`. Every student screen is admin only; the server
//! still enforces ownership on its own.

use crate::form::FormMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRoute {
    Login,
    Students,
    NewStudent,
    ViewStudent(i64),
    EditStudent(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Show(ClientRoute),
    Redirect(ClientRoute),
    NotFound,
}

impl ClientRoute {
    pub fn resolve(path: &str) -> Resolved {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => return Resolved::Redirect(ClientRoute::Login),
            ["login"] => ClientRoute::Login,
            ["students"] => ClientRoute::Students,
            ["students", "new"] => ClientRoute::NewStudent,
            ["students", id] => match id.parse() {
                Ok(id) => ClientRoute::ViewStudent(id),
                Err(_) => return Resolved::NotFound,
            },
            ["students", id, "edit"] => match id.parse() {
                Ok(id) => ClientRoute::EditStudent(id),
                Err(_) => return Resolved::NotFound,
            },
            _ => return Resolved::NotFound,
        };
        Resolved::Show(route)
    }

    pub fn path(&self) -> String {
        match self {
            ClientRoute::Login => "/login".to_string(),
            ClientRoute::Students => "/students".to_string(),
            ClientRoute::NewStudent => "/students/new".to_string(),
            ClientRoute::ViewStudent(id) => format!("/students/{id}"),
            ClientRoute::EditStudent(id) => format!("/students/{id}/edit"),
        }
    }

    /// The form mode this route opens, if it shows the form.
    pub fn form_mode(&self) -> Option<FormMode> {
        match self {
            ClientRoute::NewStudent => Some(FormMode::Create),
            ClientRoute::ViewStudent(_) => Some(FormMode::View),
            ClientRoute::EditStudent(_) => Some(FormMode::Edit),
            ClientRoute::Login | ClientRoute::Students => None,
        }
    }

    pub fn requires_admin(&self) -> bool {
        !matches!(self, ClientRoute::Login)
    }
}
