use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {0:?} waiting for {1}")]
    Timeout(Duration, String),

    #[error("Could not find the <h2 id=\"{codename}\"> anchor on the OTA page")]
    AnchorNotFound { codename: String },

    #[error("Could not find the OTA table after the \"{codename}\" heading")]
    TableNotFound { codename: String },

    #[error("No rows in the OTA table for \"{codename}\"")]
    EmptyTable { codename: String },

    #[error("No .zip link in the latest OTA row for \"{codename}\"")]
    ZipLinkNotFound { codename: String },
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
