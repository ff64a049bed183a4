use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};

/// Handler-level failure, rendered as an `{"error": ...}` JSON envelope.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    TooManyRequests(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest(message.to_string())
    }

    /// Logs the underlying failure and keeps only the generic message for
    /// the caller.
    pub fn internal(message: &str, err: anyhow::Error) -> Self {
        tracing::error!("{message}: {err:#}");
        Self::Internal(message.to_string())
    }

    fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::BadRequest(_) => Status::BadRequest,
            Self::TooManyRequests(_) => Status::TooManyRequests,
            Self::Internal(_) => Status::InternalServerError,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::TooManyRequests(message)
            | Self::Internal(message) => message,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::json!({ "error": self.message() }).to_string();

        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), Status::NotFound);
        assert_eq!(ApiError::bad_request("x").status(), Status::BadRequest);
        assert_eq!(
            ApiError::TooManyRequests("x".to_string()).status(),
            Status::TooManyRequests
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).status(),
            Status::InternalServerError
        );
    }
}
