use thiserror::Error;
use vitrine_core::CoreError;

/// Errors returned by the storefront API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status other than 404.
    #[error("API error {status} from {url}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        url: String,
        /// The server's `error` or `message` field, when it sent one.
        message: Option<String>,
    },

    #[error("not found: {url}")]
    NotFound { url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The auth provider refused the operation.
    #[error("auth provider error: {0}")]
    Auth(String),

    /// A background request was aborted or panicked before finishing.
    #[error("background request did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ClientError {
    /// Text for a user-facing error notice.
    ///
    /// Server-provided messages and local validation errors are shown as-is;
    /// everything else collapses to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Validation(e) => e.to_string(),
            ClientError::Auth(message) => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ClientError::Api {
            status: 400,
            url: "http://api/category".to_owned(),
            message: Some("Category already exists".to_owned()),
        };
        assert_eq!(err.user_message("Update failed"), "Category already exists");
    }

    #[test]
    fn user_message_falls_back() {
        let err = ClientError::Api {
            status: 500,
            url: "http://api/category".to_owned(),
            message: None,
        };
        assert_eq!(err.user_message("Update failed"), "Update failed");

        let err = ClientError::NotFound {
            url: "http://api/products/x".to_owned(),
        };
        assert_eq!(err.user_message("Update failed"), "Update failed");
    }

    #[test]
    fn validation_errors_are_shown_verbatim() {
        let err = ClientError::from(CoreError::PasswordMismatch);
        assert_eq!(err.user_message("x"), "new passwords do not match");
    }
}
