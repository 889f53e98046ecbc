use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(#[from] PoolError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid client name: {0:?}")]
    InvalidClientName(String),
    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),
    #[error("Terminal prompt failed: {0}")]
    Prompt(String),
    #[error("Chat client setup failed: {0}")]
    Chat(#[from] crate::llm::ChatError),
}
