use crate::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// Sección `[client]` del archivo de configuración.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
  /// URL base del backend REST, incluido el prefijo `/api`.
  #[serde(default = "default_api_url")]
  pub api_url: String,
}

fn default_api_url() -> String {
  "http://localhost:5000/api".to_string()
}

impl Default for ClientConfig {
  fn default() -> Self {
    ClientConfig { api_url: default_api_url() }
  }
}

impl ClientConfig {
  /// Carga la sección y la vuelve a escribir, de forma que el archivo
  /// siempre acabe con los valores efectivos a la vista.
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("client")?;
    CONFIG_BACKEND.save_section("client", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("client", self)
  }
}
