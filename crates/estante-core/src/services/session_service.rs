use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::domain::user::{Credentials, NewAccount, User};
use crate::errors::{CoreError, Outcome};
use crate::ports::{AuthGateway, Notifier, TokenStore};

/// Instantánea del estado de sesión que leen las vistas.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
  pub user: Option<User>,
  pub is_authenticated: bool,
}

/// Store de sesión: identidad del usuario actual + token persistido.
///
/// El token vive en el `TokenStore` durable; aquí solo queda el usuario en
/// memoria. `is_authenticated` se deriva de él, así la invariante
/// "autenticado sii hay usuario" no puede romperse desde dentro.
pub struct SessionService<A, T, N>
where
  A: AuthGateway,
  T: TokenStore,
  N: Notifier,
{
  auth: A,
  tokens: T,
  notifier: N,
  user: RwLock<Option<User>>,
}

impl<A, T, N> SessionService<A, T, N>
where
  A: AuthGateway,
  T: TokenStore,
  N: Notifier,
{
  pub fn new(auth: A, tokens: T, notifier: N) -> Self {
    Self { auth, tokens, notifier, user: RwLock::new(None) }
  }

  pub fn state(&self) -> SessionState {
    let user = self.user.read().unwrap_or_else(PoisonError::into_inner).clone();
    let is_authenticated = user.is_some();
    SessionState { user, is_authenticated }
  }

  /// Inicia sesión contra el backend.
  ///
  /// El fallo NO se propaga como `Err`: queda en una notificación de error y
  /// en el `Outcome` devuelto. El estado solo cambia si el login se completó
  /// (token persistido + usuario en memoria).
  pub async fn login(&self, email: &str, password: &str) -> Outcome {
    let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };

    tracing::debug!(email, "attempting login");

    let payload = match self.auth.login(&credentials).await {
      Ok(payload) => payload,
      Err(err) => return self.reject_login(err),
    };

    // 2xx sin token: no hay sesión utilizable.
    if payload.token.is_empty() {
      return self.reject_login(CoreError::MissingToken);
    }

    if let Err(err) = self.tokens.store(&payload.token) {
      return self.reject_login(err);
    }

    *self.write_user() = Some(payload.user);
    self.notifier.success("Successfully logged in!");
    Outcome::Completed
  }

  /// Cierra la sesión local. Nunca falla: un error purgando el token se
  /// registra y se sigue adelante.
  pub fn logout(&self) {
    if let Err(err) = self.tokens.clear() {
      tracing::warn!(error = %err, "failed to clear persisted token");
    }

    *self.write_user() = None;
    self.notifier.success("Successfully logged out!");
  }

  /// Registra una cuenta nueva.
  ///
  /// A diferencia de `login`, el error SÍ se propaga además de notificarse:
  /// el formulario lo inspecciona con [`CoreError::is_duplicate_account`]
  /// para distinguir la cuenta duplicada del fallo genérico.
  pub async fn register(&self, email: &str, password: &str, username: &str) -> Result<(), CoreError> {
    let account = NewAccount {
      username: username.to_owned(),
      email: email.to_owned(),
      password: password.to_owned(),
    };

    tracing::debug!(email, username, "registering account");

    let payload = match self.auth.register(&account).await {
      Ok(payload) => payload,
      Err(err) => {
        tracing::error!(error = %err, "registration failed");
        self.notifier.error("Registration failed. Please try again.");
        return Err(err);
      }
    };

    // El alta también entrega token; se persiste igual que en login.
    if payload.token.is_empty() {
      tracing::warn!("register response carried no token; session will not survive a restart");
    } else if let Err(err) = self.tokens.store(&payload.token) {
      tracing::warn!(error = %err, "failed to persist token after register");
    }

    *self.write_user() = Some(payload.user);
    self.notifier.success("Registration successful!");
    Ok(())
  }

  /// Derribo en memoria tras un 401: el adaptador HTTP ya purgó el token y
  /// forzó la navegación; aquí solo se descarta el usuario, sin avisos.
  pub fn invalidate(&self) {
    *self.write_user() = None;
  }

  fn reject_login(&self, err: CoreError) -> Outcome {
    tracing::error!(error = %err, "login failed");
    self.notifier.error("Login failed. Please check your credentials.");
    Outcome::Failed(err)
  }

  fn write_user(&self) -> RwLockWriteGuard<'_, Option<User>> {
    self.user.write().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::notification::Severity;
  use crate::domain::user::AuthPayload;
  use crate::domain::UserId;
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
  struct MemoryTokens {
    slot: Arc<Mutex<Option<String>>>,
  }

  impl MemoryTokens {
    fn token(&self) -> Option<String> {
      self.slot.lock().unwrap().clone()
    }
  }

  impl TokenStore for MemoryTokens {
    fn load(&self) -> Result<Option<String>, CoreError> {
      Ok(self.slot.lock().unwrap().clone())
    }

    fn store(&self, token: &str) -> Result<(), CoreError> {
      *self.slot.lock().unwrap() = Some(token.to_owned());
      Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
      *self.slot.lock().unwrap() = None;
      Ok(())
    }
  }

  #[derive(Clone, Default)]
  struct ScriptedAuth {
    login: Arc<Mutex<Option<Result<AuthPayload, CoreError>>>>,
    register: Arc<Mutex<Option<Result<AuthPayload, CoreError>>>>,
  }

  #[async_trait::async_trait]
  impl AuthGateway for ScriptedAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthPayload, CoreError> {
      self.login.lock().unwrap().take().expect("no scripted login response")
    }

    async fn register(&self, _account: &NewAccount) -> Result<AuthPayload, CoreError> {
      self.register.lock().unwrap().take().expect("no scripted register response")
    }
  }

  fn sample_user() -> User {
    User {
      id: UserId::new("1"),
      username: "a".to_string(),
      email: "a@b.com".to_string(),
      avatar: None,
    }
  }

  fn service(
    auth: ScriptedAuth,
  ) -> (SessionService<ScriptedAuth, MemoryTokens, RecordingNotifier>, MemoryTokens, RecordingNotifier) {
    let tokens = MemoryTokens::default();
    let notifier = RecordingNotifier::default();
    let svc = SessionService::new(auth, tokens.clone(), notifier.clone());
    (svc, tokens, notifier)
  }

  #[tokio::test]
  async fn login_success_persists_token_and_sets_state() {
    let auth = ScriptedAuth::default();
    *auth.login.lock().unwrap() =
      Some(Ok(AuthPayload { token: "T".to_string(), user: sample_user() }));
    let (svc, tokens, notifier) = service(auth);

    let outcome = svc.login("a@b.com", "secret1").await;

    assert!(outcome.is_completed());
    let state = svc.state();
    assert!(state.is_authenticated);
    assert_eq!(state.user.unwrap().id, UserId::new("1"));
    assert_eq!(tokens.token().as_deref(), Some("T"));
    assert_eq!(notifier.last(), Some(("Successfully logged in!".to_string(), Severity::Success)));
  }

  #[tokio::test]
  async fn login_failure_leaves_state_untouched() {
    let auth = ScriptedAuth::default();
    *auth.login.lock().unwrap() =
      Some(Err(CoreError::Backend { status: 400, message: "Invalid credentials".to_string() }));
    let (svc, tokens, notifier) = service(auth);

    let outcome = svc.login("a@b.com", "wrong").await;

    assert!(!outcome.is_completed());
    assert!(outcome.err().is_some());
    assert!(!svc.state().is_authenticated);
    assert_eq!(tokens.token(), None);
    assert_eq!(
      notifier.last(),
      Some(("Login failed. Please check your credentials.".to_string(), Severity::Error))
    );
  }

  #[tokio::test]
  async fn login_without_token_is_rejected() {
    let auth = ScriptedAuth::default();
    *auth.login.lock().unwrap() =
      Some(Ok(AuthPayload { token: String::new(), user: sample_user() }));
    let (svc, tokens, _notifier) = service(auth);

    let outcome = svc.login("a@b.com", "secret1").await;

    assert!(matches!(outcome.err(), Some(CoreError::MissingToken)));
    assert!(!svc.state().is_authenticated);
    assert_eq!(tokens.token(), None);
  }

  #[tokio::test]
  async fn logout_clears_token_and_user() {
    let auth = ScriptedAuth::default();
    *auth.login.lock().unwrap() =
      Some(Ok(AuthPayload { token: "T".to_string(), user: sample_user() }));
    let (svc, tokens, notifier) = service(auth);
    let _ = svc.login("a@b.com", "secret1").await;

    svc.logout();

    let state = svc.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.user, None);
    assert_eq!(tokens.token(), None);
    assert_eq!(notifier.last(), Some(("Successfully logged out!".to_string(), Severity::Success)));
  }

  #[tokio::test]
  async fn register_success_authenticates_and_persists_token() {
    let auth = ScriptedAuth::default();
    *auth.register.lock().unwrap() =
      Some(Ok(AuthPayload { token: "R".to_string(), user: sample_user() }));
    let (svc, tokens, notifier) = service(auth);

    svc.register("a@b.com", "secret1", "a").await.unwrap();

    assert!(svc.state().is_authenticated);
    assert_eq!(tokens.token().as_deref(), Some("R"));
    assert_eq!(notifier.last(), Some(("Registration successful!".to_string(), Severity::Success)));
  }

  #[tokio::test]
  async fn register_duplicate_account_surfaces_the_error() {
    let auth = ScriptedAuth::default();
    *auth.register.lock().unwrap() =
      Some(Err(CoreError::Backend { status: 400, message: "User already exists".to_string() }));
    let (svc, tokens, notifier) = service(auth);

    let err = svc.register("a@b.com", "secret1", "a").await.unwrap_err();

    assert!(err.is_duplicate_account());
    assert!(!svc.state().is_authenticated);
    assert_eq!(tokens.token(), None);
    assert_eq!(
      notifier.last(),
      Some(("Registration failed. Please try again.".to_string(), Severity::Error))
    );
  }

  #[tokio::test]
  async fn invalidate_discards_the_user_silently() {
    let auth = ScriptedAuth::default();
    *auth.login.lock().unwrap() =
      Some(Ok(AuthPayload { token: "T".to_string(), user: sample_user() }));
    let (svc, _tokens, notifier) = service(auth);
    let _ = svc.login("a@b.com", "secret1").await;
    let shown_before = notifier.shown.lock().unwrap().len();

    svc.invalidate();

    assert!(!svc.state().is_authenticated);
    assert_eq!(notifier.shown.lock().unwrap().len(), shown_before);
  }
}
