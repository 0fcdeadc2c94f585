//! Response envelope shared by every book endpoint

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::book::{Book, BookShort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

/// `{status, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn with_message(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Status/message only envelope (update, delete, failures)
pub type MessageResponse = ApiResponse<()>;

impl MessageResponse {
    pub fn success_message(message: impl Into<String>) -> Self {
        Self::with_message(ResponseStatus::Success, message)
    }
}

/// Payload of a successful create
#[derive(Debug, Serialize, ToSchema)]
pub struct BookIdData {
    pub id: String,
}

/// Payload of a successful list
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookShort>,
}

/// Payload of a successful fetch
#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Envelope documentation for OpenAPI
#[derive(Serialize, ToSchema)]
pub struct EnvelopeDoc {
    /// `success`, `fail` or `error`
    pub status: ResponseStatus,
    pub message: Option<String>,
    /// Operation specific payload
    pub data: Option<serde_json::Value>,
}
