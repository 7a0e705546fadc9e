use thiserror::Error;

use super::api::ResultCode;

#[derive(Debug, Error)]
pub enum TodolistsError {
    #[error("transport failure: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("request rejected by server (result code {}): {}", .result_code.0, join_messages(.messages))]
    Rejected { result_code: ResultCode, messages: Vec<String> },
    #[error("title must not be empty")]
    InvalidTitle,
}

impl TodolistsError {
    /// Message suitable for the global status banner.
    pub fn user_message(&self) -> String {
        match self {
            TodolistsError::Rejected { messages, .. } if !messages.is_empty() => join_messages(messages),
            TodolistsError::Rejected { .. } => "Some error occurred".to_string(),
            TodolistsError::Transport(e) => e.to_string(),
            TodolistsError::InvalidTitle => self.to_string(),
        }
    }
}

fn join_messages(messages: &[String]) -> String {
    if messages.is_empty() { "no details".to_string() } else { messages.join("; ") }
}
