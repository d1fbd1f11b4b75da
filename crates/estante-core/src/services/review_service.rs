use crate::domain::ids::BookId;
use crate::domain::review::{Review, ReviewDraft};
use crate::errors::CoreError;
use crate::ports::{Notifier, ReviewGateway};

/// Flujo de reseñas.
///
/// Sin estado persistente: las reseñas se piden por libro al abrir la vista
/// de detalle y se descartan al cerrarla, así que aquí no hay colección que
/// reconciliar.
pub struct ReviewService<R, N>
where
  R: ReviewGateway,
  N: Notifier,
{
  gateway: R,
  notifier: N,
}

impl<R, N> ReviewService<R, N>
where
  R: ReviewGateway,
  N: Notifier,
{
  pub fn new(gateway: R, notifier: N) -> Self {
    Self { gateway, notifier }
  }

  pub async fn reviews_for_book(&self, id: &BookId) -> Result<Vec<Review>, CoreError> {
    match self.gateway.list_for_book(id).await {
      Ok(reviews) => Ok(reviews),
      Err(err) => {
        tracing::error!(error = %err, book = %id, "failed to fetch reviews");
        self.notifier.error("Failed to fetch reviews");
        Err(err)
      }
    }
  }

  /// Publica una reseña. El llamador vuelve a pedir la lista después; el
  /// backend no devuelve la colección actualizada.
  pub async fn submit(&self, draft: ReviewDraft) -> Result<Review, CoreError> {
    match self.gateway.submit(&draft).await {
      Ok(review) => {
        self.notifier.success("Review added successfully!");
        Ok(review)
      }
      Err(err) => {
        tracing::error!(error = %err, book = %draft.book, "failed to add review");
        self.notifier.error("Failed to add review");
        Err(err)
      }
    }
  }
}
