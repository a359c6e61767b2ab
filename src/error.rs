use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("could not reach the answer service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("answer service returned a body that is not JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid answer service URL '{0}'")]
    InvalidUrl(String),
}
