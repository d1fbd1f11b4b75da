use serde_json::Value;
use thiserror::Error;

use estante_core::errors::CoreError;

/// Error del adaptador HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Fallo de transporte: DNS, conexión, TLS, body truncado.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// Body 2xx que no es JSON válido.
  #[error("invalid response body: {0}")]
  Decode(#[from] serde_json::Error),

  /// URL base o ruta mal formadas.
  #[error("invalid url: {0}")]
  Url(#[from] url::ParseError),

  /// Respuesta no-2xx, con el payload de error del backend adjunto.
  #[error("backend responded {status}")]
  Status { status: u16, payload: Value },

  /// 401: la sesión ya fue derribada (token purgado, navegación al login)
  /// antes de construir este error.
  #[error("unauthorized")]
  Unauthorized,
}

impl ApiError {
  /// Mensaje de error del payload del backend, si lo trae.
  pub fn backend_message(&self) -> Option<&str> {
    match self {
      ApiError::Status { payload, .. } => payload.get("message").and_then(Value::as_str),
      _ => None,
    }
  }
}

/// Mapeo adaptador → dominio.
pub fn map_api_error(err: ApiError) -> CoreError {
  match err {
    ApiError::Unauthorized => CoreError::Unauthorized,
    ApiError::Status { status, payload } => {
      let message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("request failed with status {status}"));
      CoreError::Backend { status, message }
    }
    other => CoreError::Transport(other.to_string()),
  }
}
