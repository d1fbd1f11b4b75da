use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use estante_core::domain::book::{Book, BookDraft, BookPatch};
use estante_core::domain::ids::BookId;
use estante_core::domain::review::{Review, ReviewDraft};
use estante_core::domain::user::{AuthPayload, Credentials, NewAccount};
use estante_core::errors::CoreError;
use estante_core::ports::{AuthGateway, BookGateway, Navigator, ReviewGateway, TokenStore};

use crate::client::{LOGIN_PATH, RestClient};
use crate::error::map_api_error;

/// Implementación de los puertos de dominio sobre [`RestClient::send`].
impl<T, N> RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  async fn call<R>(&self, method: Method, path: &str, body: Option<Value>) -> Result<R, CoreError>
  where
    R: DeserializeOwned,
  {
    let payload = self.send(method, path, body.as_ref()).await.map_err(map_api_error)?;
    serde_json::from_value(payload)
      .map_err(|e| CoreError::Transport(format!("decode response for {path}: {e}")))
  }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, CoreError> {
  serde_json::to_value(body).map_err(|e| CoreError::Transport(format!("encode request body: {e}")))
}

#[async_trait]
impl<T, N> AuthGateway for RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, CoreError> {
    self.call(Method::POST, LOGIN_PATH, Some(encode(credentials)?)).await
  }

  async fn register(&self, account: &NewAccount) -> Result<AuthPayload, CoreError> {
    self.call(Method::POST, "/auth/register", Some(encode(account)?)).await
  }
}

#[async_trait]
impl<T, N> BookGateway for RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  async fn list(&self) -> Result<Vec<Book>, CoreError> {
    self.call(Method::GET, "/books", None).await
  }

  async fn create(&self, draft: &BookDraft) -> Result<Book, CoreError> {
    self.call(Method::POST, "/books", Some(encode(draft)?)).await
  }

  async fn update(&self, id: &BookId, patch: &BookPatch) -> Result<Book, CoreError> {
    self.call(Method::PUT, &format!("/books/{id}"), Some(encode(patch)?)).await
  }

  async fn remove(&self, id: &BookId) -> Result<(), CoreError> {
    // 204 sin body; el payload (null) se descarta
    self.send(Method::DELETE, &format!("/books/{id}"), None).await.map_err(map_api_error)?;
    Ok(())
  }
}

#[async_trait]
impl<T, N> ReviewGateway for RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  async fn list_for_book(&self, id: &BookId) -> Result<Vec<Review>, CoreError> {
    self.call(Method::GET, &format!("/reviews/book/{id}"), None).await
  }

  async fn submit(&self, draft: &ReviewDraft) -> Result<Review, CoreError> {
    self.call(Method::POST, "/reviews", Some(encode(draft)?)).await
  }
}
