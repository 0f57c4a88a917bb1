use thiserror::Error;

use crate::{client::ClientError, forms::FormError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Form(#[from] FormError),
    /// Message shown as is to the user.
    #[error("{0}")]
    Failed(String),
}
