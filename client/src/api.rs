use async_trait::async_trait;
use common::students::{CreateStudentRequest, StudentRecord, UpdateStudentRequest};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or("Something went wrong"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The `message` the server sent with a failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The `{ success, count?, data, message }` envelope every endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub count: Option<usize>,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub student_id: Option<i64>,
    pub token: String,
    pub expires_at: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Everything the student screens need from the server.
#[async_trait]
pub trait StudentsApi: Send + Sync {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, ClientError>;
    async fn get_student(&self, id: i64) -> Result<StudentRecord, ClientError>;
    async fn create_student(&self, body: &CreateStudentRequest) -> Result<StudentRecord, ClientError>;
    async fn update_student(
        &self,
        id: i64,
        body: &UpdateStudentRequest,
    ) -> Result<StudentRecord, ClientError>;
    async fn delete_student(&self, id: i64) -> Result<(), ClientError>;
}

/// [`StudentsApi`] over HTTP, authenticating with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpStudentsApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStudentsApi {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Logs in and keeps the issued token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ClientError> {
        let req = self.request(Method::POST, "/api/auth/login").json(&LoginBody { email, password });
        let session: Session = self.send(req).await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn envelope<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Envelope<T>, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: None,
                });
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };

        if !status.is_success() || !envelope.success {
            tracing::warn!(status = status.as_u16(), message = ?envelope.message, "request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok(envelope)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        self.envelope(req)
            .await?
            .data
            .ok_or_else(|| ClientError::Decode("response has no data".into()))
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, ClientError> {
        self.send(self.request(Method::GET, "/api/students")).await
    }

    async fn get_student(&self, id: i64) -> Result<StudentRecord, ClientError> {
        self.send(self.request(Method::GET, &format!("/api/students/{id}")))
            .await
    }

    async fn create_student(&self, body: &CreateStudentRequest) -> Result<StudentRecord, ClientError> {
        self.send(self.request(Method::POST, "/api/students").json(body))
            .await
    }

    async fn update_student(
        &self,
        id: i64,
        body: &UpdateStudentRequest,
    ) -> Result<StudentRecord, ClientError> {
        self.send(self.request(Method::PUT, &format!("/api/students/{id}")).json(body))
            .await
    }

    async fn delete_student(&self, id: i64) -> Result<(), ClientError> {
        self.envelope::<serde_json::Value>(self.request(Method::DELETE, &format!("/api/students/{id}")))
            .await
            .map(|_| ())
    }
}
