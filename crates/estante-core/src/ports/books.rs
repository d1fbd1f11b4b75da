use async_trait::async_trait;

use crate::domain::book::{Book, BookDraft, BookPatch};
use crate::domain::ids::BookId;
use crate::errors::CoreError;

/// Puerto hacia los endpoints de libros del backend.
///
/// `list` devuelve siempre la colección completa: no hay paginación ni
/// sincronización incremental.
#[async_trait]
pub trait BookGateway: Send + Sync {
  async fn list(&self) -> Result<Vec<Book>, CoreError>;
  async fn create(&self, draft: &BookDraft) -> Result<Book, CoreError>;
  async fn update(&self, id: &BookId, patch: &BookPatch) -> Result<Book, CoreError>;
  async fn remove(&self, id: &BookId) -> Result<(), CoreError>;
}
