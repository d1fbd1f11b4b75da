pub mod adapter;
pub mod client;
pub mod error;

pub use client::RestClient;
pub use error::{ApiError, map_api_error};
