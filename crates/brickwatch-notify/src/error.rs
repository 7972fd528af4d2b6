use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord rejected the message with status {status}: {body}")]
    Discord { status: u16, body: String },

    #[error("failed to encode message payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("DISCORD_TOKEN is not set")]
    MissingToken,
}
