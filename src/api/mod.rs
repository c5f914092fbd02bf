pub mod client;
pub mod models;

use thiserror::Error;

pub use client::ApiClient;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API address: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx reply. `message` is the body's `error` field when the server sent one.
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: Option<String> },
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP {status}"),
    }
}

impl ApiError {
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            });
        Self::Server { status, message }
    }

    /// The server-reported `error` text, if this is an application error that carried one.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode(_))
    }
}
