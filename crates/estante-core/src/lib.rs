pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;
pub mod validate;

pub use errors::{CoreError, Outcome};
