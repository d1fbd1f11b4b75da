mod config;
pub mod infrastructure;

use std::sync::Arc;

use tokio::task::JoinHandle;

use estante_api::RestClient;
use estante_config::{ClientConfig, EstantePaths, FileTokenStore, PATHS};
use estante_core::domain::book::{Book, BookPatch};
use estante_core::domain::ids::BookId;
use estante_core::domain::notification::Severity;
use estante_core::domain::review::Review;
use estante_core::errors::Outcome;
use estante_core::ports::TokenStore;
use estante_core::services::{
  LibraryService, LibraryState, ReviewService, SessionService, SessionState, ToastStore,
};
use estante_core::validate::{self, BookForm, FieldError, RegistrationForm, ReviewForm};

pub use config::ClientConfigDto;
pub use infrastructure::{Screen, ScreenFeed, ToastNotifier, ToastOverlay};

/// Type aliases to simplify the generic signatures of the services.
type Client = RestClient<FileTokenStore, ScreenFeed>;
pub type ConcreteSessionService = SessionService<Client, FileTokenStore, ToastNotifier>;
pub type ConcreteLibraryService = LibraryService<Client, ToastNotifier>;
pub type ConcreteReviewService = ReviewService<Client, ToastNotifier>;

/// Application state owned by the application root and handed to every
/// command. No ambient singletons: tests build a fresh one per case via
/// [`AppState::wire`].
pub struct AppState {
  pub session: Arc<ConcreteSessionService>,
  pub library: Arc<ConcreteLibraryService>,
  pub reviews: Arc<ConcreteReviewService>,
  pub toasts: Arc<ToastStore>,
  pub screens: Arc<ScreenFeed>,
  tasks: Vec<JoinHandle<()>>,
}

impl AppState {
  /// Wires adapters into services. Must run inside a tokio runtime: it
  /// spawns the toast overlay and the session-teardown watcher.
  pub fn wire(config: &ClientConfig, paths: &EstantePaths) -> anyhow::Result<AppState> {
    // --- Dependency Injection Phase ---

    // 1. Durable token slot (survives restarts until logout or a 401)
    let tokens = Arc::new(FileTokenStore::new(paths));

    // 2. Screen feed: resume on the books screen when a session persisted
    let initial = match tokens.load() {
      Ok(Some(_)) => Screen::Books,
      _ => Screen::Login,
    };
    let screens = Arc::new(ScreenFeed::new(initial));

    // 3. HTTP adapter over the configured backend URL
    let client = RestClient::new(&config.api_url, Arc::clone(&tokens), Arc::clone(&screens))?;

    // 4. Notification slot + the Notifier bridge injected into every store
    let toasts = Arc::new(ToastStore::new());
    let notifier = ToastNotifier::new(Arc::clone(&toasts));

    // 5. Store services with their ports injected
    let session =
      Arc::new(SessionService::new(client.clone(), FileTokenStore::new(paths), notifier.clone()));
    let library = Arc::new(LibraryService::new(client.clone(), notifier.clone()));
    let reviews = Arc::new(ReviewService::new(client, notifier));

    // 6. Background consumers: toast auto-dismiss + in-memory session
    //    teardown when a 401 forces the login screen
    let overlay = ToastOverlay::new(Arc::clone(&toasts)).spawn();
    let teardown = spawn_session_teardown(Arc::clone(&session), screens.subscribe());

    Ok(AppState { session, library, reviews, toasts, screens, tasks: vec![overlay, teardown] })
  }
}

impl Drop for AppState {
  fn drop(&mut self) {
    for task in &self.tasks {
      task.abort();
    }
  }
}

/// A forced jump back to the login screen means the backend rejected the
/// session; the in-memory user has to go too, without toasts and without
/// touching the (already cleared) token.
fn spawn_session_teardown(
  session: Arc<ConcreteSessionService>,
  mut screens: tokio::sync::watch::Receiver<Screen>,
) -> JoinHandle<()> {
  tokio::spawn(async move {
    loop {
      if screens.changed().await.is_err() {
        break;
      }
      if *screens.borrow_and_update() == Screen::Login {
        session.invalidate();
      }
    }
  })
}

/// Inicializa el logging del proceso (filtro vía `RUST_LOG`). Una sola vez,
/// al arrancar.
pub fn init_tracing() {
  use tracing_subscriber::EnvFilter;

  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
}

/// Arranque estándar: configuración en disco + rutas de plataforma.
pub async fn bootstrap() -> anyhow::Result<AppState> {
  let config = ClientConfig::load()?;
  AppState::wire(&config, &PATHS)
}

// ---------------------------------------------------------------------------
// Commands: thin entry points for a view layer. Domain errors flatten to
// `String` at this boundary; the stores already emitted their toasts.
// ---------------------------------------------------------------------------

/// Command: login form submit. Success lands on the books screen; failure
/// leaves the form where it was (the toast already said why).
pub async fn session_login(state: &AppState, email: &str, password: &str) -> Result<SessionState, String> {
  match state.session.login(email, password).await {
    Outcome::Completed => {
      state.screens.goto(Screen::Books);
      Ok(state.session.state())
    }
    Outcome::Failed(err) => Err(err.to_string()),
  }
}

/// Command: logout. Never fails.
pub fn session_logout(state: &AppState) {
  state.session.logout();
  state.screens.goto(Screen::Login);
}

/// Command: registration form submit.
///
/// Validates before touching the network. A duplicate-account rejection gets
/// its specific toast (overwriting the store's generic one); clearing the
/// password fields is the form's job.
pub async fn session_register(state: &AppState, form: &RegistrationForm) -> Result<SessionState, String> {
  let account = validate::registration(form).map_err(|errors| join_errors(&errors))?;

  match state.session.register(&account.email, &account.password, &account.username).await {
    Ok(()) => {
      state.screens.goto(Screen::Books);
      Ok(state.session.state())
    }
    Err(err) if err.is_duplicate_account() => {
      state.toasts.show("User already exists. Please try a different email.", Severity::Error);
      Err(err.to_string())
    }
    Err(err) => Err(err.to_string()),
  }
}

/// Command: current session snapshot.
pub fn session_state(state: &AppState) -> SessionState {
  state.session.state()
}

/// Command: reload the whole collection from the backend.
pub async fn library_fetch(state: &AppState) -> Result<LibraryState, String> {
  match state.library.fetch_books().await {
    Outcome::Completed => Ok(state.library.state()),
    Outcome::Failed(err) => Err(err.to_string()),
  }
}

/// Command: current collection snapshot.
pub fn library_state(state: &AppState) -> LibraryState {
  state.library.state()
}

/// Command: add-book form submit. Invalid forms never reach the network.
pub async fn library_add_book(state: &AppState, form: &BookForm) -> Result<Book, String> {
  let draft = validate::book_form(form).map_err(|errors| join_errors(&errors))?;
  state.library.add_book(draft).await.map_err(|e| e.to_string())
}

/// Command: edit-modal submit; `patch` carries only the changed fields.
pub async fn library_update_book(state: &AppState, id: &str, patch: BookPatch) -> Result<Book, String> {
  state.library.update_book(&BookId::new(id), patch).await.map_err(|e| e.to_string())
}

/// Command: delete a book after the card's confirmation step.
pub async fn library_delete_book(state: &AppState, id: &str) -> Result<(), String> {
  state.library.delete_book(&BookId::new(id)).await.map_err(|e| e.to_string())
}

/// Command: reviews for the details view. Fetched on open, discarded on
/// close; nothing is cached client-side.
pub async fn reviews_for_book(state: &AppState, id: &str) -> Result<Vec<Review>, String> {
  state.reviews.reviews_for_book(&BookId::new(id)).await.map_err(|e| e.to_string())
}

/// Command: review form submit; the view refetches the list afterwards.
pub async fn review_submit(state: &AppState, form: &ReviewForm) -> Result<Review, String> {
  let draft = validate::review_form(form).map_err(|errors| join_errors(&errors))?;
  state.reviews.submit(draft).await.map_err(|e| e.to_string())
}

/// Command: retrieve the persisted client configuration.
pub fn client_get_config() -> Result<ClientConfigDto, String> {
  let cfg = ClientConfig::load().map_err(|e| e.to_string())?;
  Ok(ClientConfigDto::from(cfg))
}

/// Command: persist updated client configuration.
pub fn client_save_config(input: ClientConfigDto) -> Result<(), String> {
  let cfg = ClientConfig::from(input);
  cfg.save().map_err(|e| e.to_string())
}

fn join_errors(errors: &[FieldError]) -> String {
  errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
