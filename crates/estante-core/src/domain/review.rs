use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, ReviewId};
use crate::domain::rating::Rating;

/// Autor de una reseña, tal como lo incrusta el backend en cada entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
  pub username: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
}

/// Reseña de un libro.
///
/// Solo lectura en el cliente: se piden bajo demanda por libro y se
/// descartan al cerrar la vista. No hay edición ni borrado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  #[serde(rename = "_id")]
  pub id: ReviewId,
  pub user: Reviewer,
  pub rating: Rating,
  pub comment: String,
  pub created_at: DateTime<Utc>,
}

/// Payload de `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDraft {
  pub book: BookId,
  pub rating: Rating,
  pub comment: String,
}
