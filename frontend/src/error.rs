use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("server answered with status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("required element #{0} is missing from the page")]
    MissingElement(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
