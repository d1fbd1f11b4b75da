use async_trait::async_trait;

use crate::domain::user::{AuthPayload, Credentials, NewAccount};
use crate::errors::CoreError;

/// Puerto hacia los endpoints de autenticación del backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
  async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, CoreError>;
  async fn register(&self, account: &NewAccount) -> Result<AuthPayload, CoreError>;
}
