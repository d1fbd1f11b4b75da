mod backend;
mod io;
mod model;
mod paths;
mod token;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use model::ClientConfig;
pub use paths::{ConfigError, EstantePaths};
pub use token::FileTokenStore;

use once_cell::sync::Lazy;

// Singleton de paths (portable / system)
pub static PATHS: Lazy<EstantePaths> =
  Lazy::new(|| EstantePaths::detect().expect("failed to init EstantePaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> =
  Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
