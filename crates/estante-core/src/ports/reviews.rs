use async_trait::async_trait;

use crate::domain::ids::BookId;
use crate::domain::review::{Review, ReviewDraft};
use crate::errors::CoreError;

/// Puerto hacia los endpoints de reseñas del backend.
#[async_trait]
pub trait ReviewGateway: Send + Sync {
  async fn list_for_book(&self, id: &BookId) -> Result<Vec<Review>, CoreError>;
  async fn submit(&self, draft: &ReviewDraft) -> Result<Review, CoreError>;
}
