use estante_config::ClientConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientConfigDto {
  pub api_url: String,
}

impl From<ClientConfig> for ClientConfigDto {
  fn from(cfg: ClientConfig) -> Self {
    ClientConfigDto { api_url: cfg.api_url }
  }
}

impl From<ClientConfigDto> for ClientConfig {
  fn from(dto: ClientConfigDto) -> Self {
    ClientConfig { api_url: dto.api_url }
  }
}
