pub mod devices;
pub mod fetch;
