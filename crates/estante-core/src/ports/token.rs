use crate::errors::CoreError;

/// Ranura durable para el bearer token.
///
/// Sobrevive a reinicios del proceso; se vacía en logout o cuando el backend
/// responde 401. Es la única pieza de estado del cliente que vive fuera de
/// memoria junto con la configuración.
pub trait TokenStore: Send + Sync {
  fn load(&self) -> Result<Option<String>, CoreError>;
  fn store(&self, token: &str) -> Result<(), CoreError>;
  fn clear(&self) -> Result<(), CoreError>;
}
