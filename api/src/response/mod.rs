use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "count": 2,
///   "data": [ ... ],
///   "message": "Students retrieved successfully"
/// }
/// ```
///
/// `count` only appears on list responses. Error responses carry `T::default()`
/// as `data`, so handlers pick a `T` whose default is harmless (usually [`Empty`]).
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            count: None,
            data: T::default(),
            message: message.into(),
        }
    }
}

impl<T> ApiResponse<Vec<T>>
where
    T: Serialize,
{
    /// A list response; `count` is the number of items in `data`.
    pub fn list(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
            message: message.into(),
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Serialize, Default)]
pub struct Empty {}
