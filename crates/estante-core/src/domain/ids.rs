use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador opaco de un libro, asignado por el backend.
///
/// El cliente nunca genera estos ids: llegan en la respuesta de creación y
/// se reenvían tal cual en updates y deletes. En el wire viajan como el
/// campo `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
  pub fn new(raw: impl Into<String>) -> Self {
    BookId(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for BookId {
  fn from(raw: String) -> Self {
    BookId(raw)
  }
}

impl From<BookId> for String {
  fn from(id: BookId) -> Self {
    id.0
  }
}

impl fmt::Display for BookId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador opaco de un usuario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  pub fn new(raw: impl Into<String>) -> Self {
    UserId(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for UserId {
  fn from(raw: String) -> Self {
    UserId(raw)
  }
}

impl From<UserId> for String {
  fn from(id: UserId) -> Self {
    id.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador opaco de una reseña.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
  pub fn new(raw: impl Into<String>) -> Self {
    ReviewId(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for ReviewId {
  fn from(raw: String) -> Self {
    ReviewId(raw)
  }
}

impl From<ReviewId> for String {
  fn from(id: ReviewId) -> Self {
    id.0
  }
}

impl fmt::Display for ReviewId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
