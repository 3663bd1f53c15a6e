use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read device file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse device file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
