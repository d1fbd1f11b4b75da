use serde::{Deserialize, Serialize};

/// Severidad visual de una notificación transitoria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  #[default]
  Success,
  Error,
  Info,
}

/// Mensaje transitorio que consume la superficie de avisos.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub message: String,
  pub severity: Severity,
}
