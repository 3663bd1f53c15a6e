pub mod devices;
pub mod download;
pub mod error;

pub use error::{Error, Result};
