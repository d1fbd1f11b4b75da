//! Validación de formularios previa a cualquier petición.
//!
//! Un formulario inválido nunca llega a la red: las funciones devuelven los
//! errores por campo o el tipo de dominio ya construido.

use serde::Deserialize;
use std::fmt;
use url::Url;

use crate::domain::book::{BookDraft, ReadingStatus};
use crate::domain::ids::BookId;
use crate::domain::rating::Rating;
use crate::domain::review::ReviewDraft;
use crate::domain::user::NewAccount;

/// Error de un campo concreto de un formulario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

impl FieldError {
  fn new(field: &'static str, message: impl Into<String>) -> Self {
    FieldError { field, message: message.into() }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Formulario de alta/edición de libro, tal como lo envía la vista.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
  pub title: String,
  pub author: String,
  pub isbn: String,
  pub description: String,
  pub cover_url: String,
  pub status: ReadingStatus,
  pub rating: u8,
}

pub fn book_form(form: &BookForm) -> Result<BookDraft, Vec<FieldError>> {
  let mut errors = Vec::new();

  if form.title.is_empty() {
    errors.push(FieldError::new("title", "Title is required"));
  }
  if form.author.is_empty() {
    errors.push(FieldError::new("author", "Author is required"));
  }
  if form.isbn.chars().count() < 10 {
    errors.push(FieldError::new("isbn", "ISBN must be at least 10 characters"));
  }
  if form.description.chars().count() < 10 {
    errors.push(FieldError::new("description", "Description must be at least 10 characters"));
  }
  if Url::parse(&form.cover_url).is_err() {
    errors.push(FieldError::new("coverUrl", "Must be a valid URL"));
  }

  let rating = match Rating::new(form.rating) {
    Some(rating) => rating,
    None => {
      errors.push(FieldError::new("rating", "Rating must be between 0 and 5"));
      Rating::default()
    }
  };

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(BookDraft {
    title: form.title.clone(),
    author: form.author.clone(),
    isbn: form.isbn.clone(),
    description: form.description.clone(),
    cover_url: form.cover_url.clone(),
    status: form.status,
    rating,
  })
}

/// Formulario de registro de cuenta.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
  pub email: String,
  pub username: String,
  pub password: String,
  pub confirm_password: String,
}

pub fn registration(form: &RegistrationForm) -> Result<NewAccount, Vec<FieldError>> {
  let mut errors = Vec::new();

  if !is_email(&form.email) {
    errors.push(FieldError::new("email", "Invalid email address"));
  }
  if form.username.chars().count() < 3 {
    errors.push(FieldError::new("username", "Username must be at least 3 characters"));
  }
  if form.password.chars().count() < 6 {
    errors.push(FieldError::new("password", "Password must be at least 6 characters"));
  }
  if form.password != form.confirm_password {
    errors.push(FieldError::new("confirmPassword", "Passwords don't match"));
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(NewAccount {
    username: form.username.clone(),
    email: form.email.clone(),
    password: form.password.clone(),
  })
}

/// Formulario de reseña de la vista de detalle.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
  pub book: String,
  pub rating: u8,
  pub comment: String,
}

pub fn review_form(form: &ReviewForm) -> Result<ReviewDraft, Vec<FieldError>> {
  // La vista muestra un único mensaje cuando falta cualquiera de las dos.
  if form.rating == 0 || form.comment.trim().is_empty() {
    return Err(vec![FieldError::new("review", "Please provide both rating and comment")]);
  }

  let Some(rating) = Rating::new(form.rating) else {
    return Err(vec![FieldError::new("rating", "Rating must be between 0 and 5")]);
  };

  Ok(ReviewDraft {
    book: BookId::new(form.book.clone()),
    rating,
    comment: form.comment.trim().to_owned(),
  })
}

/// Comprobación mínima de email: parte local no vacía, una arroba y dominio
/// con al menos un punto interior.
fn is_email(raw: &str) -> bool {
  if raw.contains(char::is_whitespace) {
    return false;
  }

  let Some((local, domain)) = raw.split_once('@') else {
    return false;
  };

  !local.is_empty()
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && !domain.contains('@')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_book_form() -> BookForm {
    BookForm {
      title: "A Wizard of Earthsea".to_string(),
      author: "Ursula K. Le Guin".to_string(),
      isbn: "9780441007318".to_string(),
      description: "A wizard's coming of age on Gont.".to_string(),
      cover_url: "https://covers.example.com/earthsea.jpg".to_string(),
      status: ReadingStatus::WantToRead,
      rating: 0,
    }
  }

  #[test]
  fn valid_book_form_becomes_a_draft() {
    let draft = book_form(&valid_book_form()).unwrap();
    assert_eq!(draft.title, "A Wizard of Earthsea");
    assert_eq!(draft.rating.as_u8(), 0);
  }

  #[test]
  fn book_form_collects_every_field_error() {
    let form = BookForm {
      title: String::new(),
      author: String::new(),
      isbn: "123".to_string(),
      description: "short".to_string(),
      cover_url: "not a url".to_string(),
      status: ReadingStatus::Reading,
      rating: 9,
    };

    let errors = book_form(&form).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

    assert_eq!(fields, vec!["title", "author", "isbn", "description", "coverUrl", "rating"]);
    assert_eq!(errors[0].message, "Title is required");
    assert_eq!(errors[2].message, "ISBN must be at least 10 characters");
  }

  #[test]
  fn registration_rejects_mismatched_passwords() {
    let form = RegistrationForm {
      email: "a@b.com".to_string(),
      username: "abc".to_string(),
      password: "secret1".to_string(),
      confirm_password: "secret2".to_string(),
    };

    let errors = registration(&form).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "confirmPassword");
    assert_eq!(errors[0].message, "Passwords don't match");
  }

  #[test]
  fn registration_validates_email_shape() {
    for bad in ["", "a", "a@", "@b.com", "a@b", "a b@c.com", "a@.com"] {
      assert!(!is_email(bad), "{bad:?} should be rejected");
    }
    assert!(is_email("a@b.com"));
    assert!(is_email("reader+shelf@books.example.org"));
  }

  #[test]
  fn review_needs_both_rating_and_comment() {
    let form = ReviewForm { book: "1".to_string(), rating: 0, comment: "great".to_string() };
    let errors = review_form(&form).unwrap_err();
    assert_eq!(errors[0].message, "Please provide both rating and comment");

    let form = ReviewForm { book: "1".to_string(), rating: 4, comment: "   ".to_string() };
    assert!(review_form(&form).is_err());

    let form = ReviewForm { book: "1".to_string(), rating: 4, comment: "  great  ".to_string() };
    let draft = review_form(&form).unwrap();
    assert_eq!(draft.comment, "great");
  }
}
