use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use estante_core::errors::CoreError;
use estante_core::ports::TokenStore;

use crate::io::atomic_write_str;
use crate::paths::EstantePaths;

/// Ranura durable del bearer token: un archivo de nombre fijo en el
/// directorio de datos.
///
/// Sobrevive a reinicios del proceso; se vacía en logout o cuando el
/// backend responde 401. Manipular el archivo a mano puede desalinear la
/// ranura del estado en memoria: riesgo asumido.
pub struct FileTokenStore {
  path: PathBuf,
}

impl FileTokenStore {
  pub fn new(paths: &EstantePaths) -> Self {
    Self { path: paths.token_file() }
  }

  /// Ranura en una ruta arbitraria (tests y herramientas).
  pub fn at(path: PathBuf) -> Self {
    Self { path }
  }
}

impl TokenStore for FileTokenStore {
  fn load(&self) -> Result<Option<String>, CoreError> {
    match fs::read_to_string(&self.path) {
      Ok(raw) => {
        let token = raw.trim().to_owned();
        if token.is_empty() { Ok(None) } else { Ok(Some(token)) }
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(CoreError::TokenStore(e.to_string())),
    }
  }

  fn store(&self, token: &str) -> Result<(), CoreError> {
    atomic_write_str(&self.path, token).map_err(|e| CoreError::TokenStore(e.to_string()))
  }

  fn clear(&self) -> Result<(), CoreError> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(CoreError::TokenStore(e.to_string())),
    }
  }
}
