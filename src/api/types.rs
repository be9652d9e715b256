use serde::Serialize;

/// Envelope for collection reads: `{msg, result}`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub msg: String,
    pub result: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(msg: impl Into<String>, result: Vec<T>) -> Self {
        Self {
            msg: msg.into(),
            result,
        }
    }
}

/// Envelope for single-item reads: `{Message, result}`.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    #[serde(rename = "Message")]
    pub message: String,
    pub result: T,
}

impl<T> ItemResponse<T> {
    pub fn new(message: impl Into<String>, result: T) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error response: `{message, error: true}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: bool,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub uptime_seconds: u64,
}
