use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::domain::book::{Book, BookDraft, BookPatch};
use crate::domain::ids::BookId;
use crate::errors::{CoreError, Outcome};
use crate::ports::{BookGateway, Notifier};

/// Estado observable de la colección.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
  pub books: Vec<Book>,
  pub loading: bool,
  pub error: Option<String>,
}

/// Store de la colección de libros: espeja en memoria las respuestas del
/// backend.
///
/// Todas las operaciones siguen el mismo patrón: marcar `loading` y limpiar
/// `error`, llamar al gateway, reconciliar la colección local y soltar
/// `loading` pase lo que pase. Las escrituras (`add`/`update`/`delete`)
/// propagan el fallo al llamador además de notificarlo; `fetch` solo lo deja
/// en el estado y en el `Outcome`.
pub struct LibraryService<B, N>
where
  B: BookGateway,
  N: Notifier,
{
  gateway: B,
  notifier: N,
  state: RwLock<LibraryState>,
}

impl<B, N> LibraryService<B, N>
where
  B: BookGateway,
  N: Notifier,
{
  pub fn new(gateway: B, notifier: N) -> Self {
    Self { gateway, notifier, state: RwLock::new(LibraryState::default()) }
  }

  pub fn state(&self) -> LibraryState {
    self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Sustituye la colección completa por la lista del servidor.
  ///
  /// Sin aviso en éxito. El fallo queda en `error`, en un toast y en el
  /// `Outcome`; no se propaga como `Err`.
  pub async fn fetch_books(&self) -> Outcome {
    self.begin();

    match self.gateway.list().await {
      Ok(books) => {
        let mut state = self.write();
        state.books = books;
        state.loading = false;
        Outcome::Completed
      }
      Err(err) => {
        tracing::error!(error = %err, "failed to fetch books");
        self.settle_failure(&err);
        Outcome::Failed(err)
      }
    }
  }

  /// Crea un libro. El backend asigna id y fecha de alta; el libro devuelto
  /// se añade al final, preservando el orden de inserción.
  pub async fn add_book(&self, draft: BookDraft) -> Result<Book, CoreError> {
    self.begin();

    match self.gateway.create(&draft).await {
      Ok(book) => {
        {
          let mut state = self.write();
          state.books.push(book.clone());
          state.loading = false;
        }
        self.notifier.success("Book added successfully!");
        Ok(book)
      }
      Err(err) => {
        tracing::error!(error = %err, "failed to add book");
        self.settle_failure(&err);
        Err(err)
      }
    }
  }

  /// Aplica el cambio en el servidor y vuelca los campos devueltos sobre la
  /// entrada local con ese id. Las demás entradas no se tocan; si el id no
  /// está en la colección, la reconciliación es un no-op silencioso.
  pub async fn update_book(&self, id: &BookId, patch: BookPatch) -> Result<Book, CoreError> {
    self.begin();

    match self.gateway.update(id, &patch).await {
      Ok(updated) => {
        {
          let mut state = self.write();
          if let Some(entry) = state.books.iter_mut().find(|book| book.id == *id) {
            *entry = updated.clone();
          }
          state.loading = false;
        }
        self.notifier.success("Book updated successfully!");
        Ok(updated)
      }
      Err(err) => {
        tracing::error!(error = %err, book = %id, "failed to update book");
        self.settle_failure(&err);
        Err(err)
      }
    }
  }

  /// Borra en el servidor y, confirmado el borrado, retira la primera
  /// entrada local con ese id. Id ausente: no-op.
  pub async fn delete_book(&self, id: &BookId) -> Result<(), CoreError> {
    self.begin();

    match self.gateway.remove(id).await {
      Ok(()) => {
        {
          let mut state = self.write();
          if let Some(position) = state.books.iter().position(|book| book.id == *id) {
            state.books.remove(position);
          }
          state.loading = false;
        }
        self.notifier.success("Book deleted successfully!");
        Ok(())
      }
      Err(err) => {
        tracing::error!(error = %err, book = %id, "failed to delete book");
        self.settle_failure(&err);
        Err(err)
      }
    }
  }

  fn begin(&self) {
    let mut state = self.write();
    state.loading = true;
    state.error = None;
  }

  fn settle_failure(&self, err: &CoreError) {
    let message = err.to_string();
    {
      let mut state = self.write();
      state.loading = false;
      state.error = Some(message.clone());
    }
    self.notifier.error(&message);
  }

  fn write(&self) -> RwLockWriteGuard<'_, LibraryState> {
    self.state.write().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::book::ReadingStatus;
  use crate::domain::notification::Severity;
  use crate::domain::Rating;
  use chrono::{TimeZone, Utc};
  use std::sync::{Arc, Mutex};

  #[derive(Clone, Default)]
  struct RecordingNotifier {
    shown: Arc<Mutex<Vec<(String, Severity)>>>,
  }

  impl RecordingNotifier {
    fn last(&self) -> Option<(String, Severity)> {
      self.shown.lock().unwrap().last().cloned()
    }
  }

  impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
      self.shown.lock().unwrap().push((message.to_owned(), severity));
    }
  }

  #[derive(Clone, Default)]
  struct ScriptedBooks {
    list: Arc<Mutex<Option<Result<Vec<Book>, CoreError>>>>,
    create: Arc<Mutex<Option<Result<Book, CoreError>>>>,
    update: Arc<Mutex<Option<Result<Book, CoreError>>>>,
    remove: Arc<Mutex<Option<Result<(), CoreError>>>>,
  }

  #[async_trait::async_trait]
  impl BookGateway for ScriptedBooks {
    async fn list(&self) -> Result<Vec<Book>, CoreError> {
      self.list.lock().unwrap().take().expect("no scripted list response")
    }

    async fn create(&self, _draft: &BookDraft) -> Result<Book, CoreError> {
      self.create.lock().unwrap().take().expect("no scripted create response")
    }

    async fn update(&self, _id: &BookId, _patch: &BookPatch) -> Result<Book, CoreError> {
      self.update.lock().unwrap().take().expect("no scripted update response")
    }

    async fn remove(&self, _id: &BookId) -> Result<(), CoreError> {
      self.remove.lock().unwrap().take().expect("no scripted remove response")
    }
  }

  fn sample_book(id: &str, title: &str) -> Book {
    Book {
      id: BookId::new(id),
      title: title.to_string(),
      author: "Ursula K. Le Guin".to_string(),
      isbn: "9780441007318".to_string(),
      description: "A wizard's coming of age on Gont.".to_string(),
      cover_url: "https://covers.example.com/earthsea.jpg".to_string(),
      status: ReadingStatus::Reading,
      rating: Rating::new(3).unwrap(),
      date_added: Utc.with_ymd_and_hms(2024, 11, 2, 10, 15, 0).unwrap(),
      date_completed: None,
    }
  }

  fn sample_draft() -> BookDraft {
    BookDraft {
      title: "A Wizard of Earthsea".to_string(),
      author: "Ursula K. Le Guin".to_string(),
      isbn: "9780441007318".to_string(),
      description: "A wizard's coming of age on Gont.".to_string(),
      cover_url: "https://covers.example.com/earthsea.jpg".to_string(),
      status: ReadingStatus::Reading,
      rating: Rating::new(3).unwrap(),
    }
  }

  fn service(
    gateway: ScriptedBooks,
  ) -> (LibraryService<ScriptedBooks, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let svc = LibraryService::new(gateway, notifier.clone());
    (svc, notifier)
  }

  #[tokio::test]
  async fn fetch_replaces_the_whole_collection() {
    let gateway = ScriptedBooks::default();
    *gateway.list.lock().unwrap() = Some(Ok(vec![sample_book("1", "Earthsea")]));
    let (svc, notifier) = service(gateway.clone());

    let outcome = svc.fetch_books().await;

    assert!(outcome.is_completed());
    let state = svc.state();
    assert_eq!(state.books.len(), 1);
    assert!(!state.loading);
    assert_eq!(state.error, None);
    // fetch no emite aviso en éxito
    assert_eq!(notifier.last(), None);

    *gateway.list.lock().unwrap() = Some(Ok(vec![]));
    let _ = svc.fetch_books().await;
    assert!(svc.state().books.is_empty());
  }

  #[tokio::test]
  async fn add_appends_the_server_book() {
    let gateway = ScriptedBooks::default();
    let created = sample_book("9", "A Wizard of Earthsea");
    *gateway.create.lock().unwrap() = Some(Ok(created.clone()));
    *gateway.list.lock().unwrap() = Some(Ok(vec![created.clone()]));
    let (svc, notifier) = service(gateway);

    let returned = svc.add_book(sample_draft()).await.unwrap();

    assert_eq!(returned, created);
    assert_eq!(svc.state().books, vec![created.clone()]);
    assert_eq!(notifier.last(), Some(("Book added successfully!".to_string(), Severity::Success)));

    // tras refetch la colección contiene exactamente el libro del servidor
    let _ = svc.fetch_books().await;
    assert_eq!(svc.state().books, vec![created]);
  }

  #[tokio::test]
  async fn update_touches_only_the_matching_entry() {
    let gateway = ScriptedBooks::default();
    let untouched = sample_book("1", "Left Hand of Darkness");
    let target = sample_book("2", "Earthsea");
    *gateway.list.lock().unwrap() = Some(Ok(vec![untouched.clone(), target.clone()]));

    let mut updated = target.clone();
    updated.rating = Rating::new(4).unwrap();
    *gateway.update.lock().unwrap() = Some(Ok(updated.clone()));

    let (svc, _notifier) = service(gateway);
    let _ = svc.fetch_books().await;

    svc.update_book(&target.id, BookPatch::rating(Rating::new(4).unwrap())).await.unwrap();

    let state = svc.state();
    assert_eq!(state.books[0], untouched);
    assert_eq!(state.books[1].rating.as_u8(), 4);
    assert_eq!(state.books[1].title, target.title);
  }

  #[tokio::test]
  async fn update_with_unknown_id_leaves_the_collection_alone() {
    let gateway = ScriptedBooks::default();
    let existing = sample_book("1", "Earthsea");
    *gateway.list.lock().unwrap() = Some(Ok(vec![existing.clone()]));
    *gateway.update.lock().unwrap() = Some(Ok(sample_book("ghost", "Ghost")));

    let (svc, _notifier) = service(gateway);
    let _ = svc.fetch_books().await;

    svc.update_book(&BookId::new("ghost"), BookPatch::default()).await.unwrap();

    assert_eq!(svc.state().books, vec![existing]);
  }

  #[tokio::test]
  async fn delete_removes_exactly_one_entry() {
    let gateway = ScriptedBooks::default();
    let a = sample_book("1", "Earthsea");
    let b = sample_book("2", "The Dispossessed");
    *gateway.list.lock().unwrap() = Some(Ok(vec![a.clone(), b.clone()]));
    *gateway.remove.lock().unwrap() = Some(Ok(()));

    let (svc, notifier) = service(gateway.clone());
    let _ = svc.fetch_books().await;

    svc.delete_book(&a.id).await.unwrap();
    assert_eq!(svc.state().books, vec![b]);
    assert_eq!(notifier.last(), Some(("Book deleted successfully!".to_string(), Severity::Success)));

    // id ausente: no-op, la longitud no cambia
    *gateway.remove.lock().unwrap() = Some(Ok(()));
    svc.delete_book(&BookId::new("missing")).await.unwrap();
    assert_eq!(svc.state().books.len(), 1);
  }

  #[tokio::test]
  async fn write_failure_sets_error_notifies_and_reraises() {
    let gateway = ScriptedBooks::default();
    *gateway.create.lock().unwrap() =
      Some(Err(CoreError::Backend { status: 422, message: "Invalid ISBN".to_string() }));
    let (svc, notifier) = service(gateway);

    let err = svc.add_book(sample_draft()).await.unwrap_err();

    assert!(matches!(err, CoreError::Backend { status: 422, .. }));
    let state = svc.state();
    assert!(state.books.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Invalid ISBN"));
    assert_eq!(notifier.last(), Some(("Invalid ISBN".to_string(), Severity::Error)));
  }

  #[tokio::test]
  async fn fetch_failure_is_recorded_but_not_raised() {
    let gateway = ScriptedBooks::default();
    *gateway.list.lock().unwrap() = Some(Err(CoreError::Transport("connection refused".to_string())));
    let (svc, notifier) = service(gateway);

    let outcome = svc.fetch_books().await;

    assert!(matches!(outcome.err(), Some(CoreError::Transport(_))));
    let state = svc.state();
    assert!(!state.loading);
    assert!(state.error.is_some());
    assert_eq!(notifier.shown.lock().unwrap().len(), 1);
  }
}
