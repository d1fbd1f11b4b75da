use crate::domain::notification::Severity;

/// Salida de avisos hacia la capa de presentación.
///
/// Emitir es fire-and-forget: nunca puede hacer fallar la operación que
/// notifica.
pub trait Notifier: Send + Sync {
  fn notify(&self, message: &str, severity: Severity);

  fn success(&self, message: &str) {
    self.notify(message, Severity::Success);
  }

  fn error(&self, message: &str) {
    self.notify(message, Severity::Error);
  }
}
