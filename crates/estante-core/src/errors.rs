use thiserror::Error;

/// Error del núcleo del cliente.
///
/// Los servicios emiten la notificación de usuario correspondiente antes de
/// propagarlo; las capas superiores solo lo mapean a mensajes o logs.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
  /// Fallo de red o de transporte antes de obtener respuesta.
  #[error("transport error: {0}")]
  Transport(String),

  /// Respuesta no-2xx del backend, con su mensaje de error.
  #[error("{message}")]
  Backend { status: u16, message: String },

  /// La sesión dejó de ser válida (401). El adaptador HTTP ya purgó el
  /// token y forzó la vuelta al login antes de devolver esto.
  #[error("session expired")]
  Unauthorized,

  /// El backend contestó 2xx al login pero sin token utilizable.
  #[error("login response carried no token")]
  MissingToken,

  /// Fallo leyendo o escribiendo la ranura durable del token.
  #[error("token storage error: {0}")]
  TokenStore(String),
}

impl CoreError {
  /// Señal de cuenta duplicada que inspecciona el formulario de registro.
  pub fn is_duplicate_account(&self) -> bool {
    matches!(self, CoreError::Backend { message, .. } if message == "User already exists")
  }

  pub fn is_unauthorized(&self) -> bool {
    matches!(self, CoreError::Unauthorized)
  }
}

/// Resultado tipado de las operaciones de lectura (`login`, `fetch_books`).
///
/// Estas operaciones no devuelven `Err`: el fallo ya quedó registrado en el
/// estado del store y en una notificación. El llamador puede inspeccionar el
/// `Outcome` en vez de releer estado mutable compartido.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
  Completed,
  Failed(CoreError),
}

impl Outcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, Outcome::Completed)
  }

  pub fn err(&self) -> Option<&CoreError> {
    match self {
      Outcome::Failed(err) => Some(err),
      Outcome::Completed => None,
    }
  }
}
