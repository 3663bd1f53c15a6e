mod chrome_finder;
mod error;
mod ota_page;
mod session;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use ota_page::{OtaPage, OTA_LISTING_URL};
pub use session::OtaBrowser;
