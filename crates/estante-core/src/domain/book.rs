use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ids::BookId;
use crate::domain::rating::Rating;

/// Estado de lectura de un libro dentro de la colección personal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
  Reading,
  Completed,
  WantToRead,
}

impl fmt::Display for ReadingStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      ReadingStatus::Reading => "reading",
      ReadingStatus::Completed => "completed",
      ReadingStatus::WantToRead => "want-to-read",
    };
    f.write_str(label)
  }
}

/// Un libro tal y como lo devuelve el backend.
///
/// El id viaja como `_id` y el resto de campos en camelCase. `dateAdded` la
/// asigna el servidor en el alta; `dateCompleted` solo existe para libros
/// terminados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
  #[serde(rename = "_id")]
  pub id: BookId,
  pub title: String,
  pub author: String,
  pub isbn: String,
  pub description: String,
  pub cover_url: String,
  pub status: ReadingStatus,
  pub rating: Rating,
  pub date_added: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_completed: Option<DateTime<Utc>>,
}

/// Payload de creación: el backend asigna `_id` y `dateAdded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
  pub title: String,
  pub author: String,
  pub isbn: String,
  pub description: String,
  pub cover_url: String,
  pub status: ReadingStatus,
  pub rating: Rating,
}

/// Reemplazo parcial para `PUT /books/:id`; solo viajan los campos presentes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub isbn: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cover_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<ReadingStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating: Option<Rating>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_completed: Option<DateTime<Utc>>,
}

impl BookPatch {
  /// Patch que solo cambia la valoración.
  pub fn rating(rating: Rating) -> Self {
    BookPatch { rating: Some(rating), ..BookPatch::default() }
  }

  /// Patch que solo cambia el estado de lectura.
  pub fn status(status: ReadingStatus) -> Self {
    BookPatch { status: Some(status), ..BookPatch::default() }
  }
}
