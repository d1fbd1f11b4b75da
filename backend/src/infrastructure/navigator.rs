use estante_core::ports::Navigator;
use tokio::sync::watch;

/// Screens a view layer can be forced onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Login,
  Books,
}

/// A `Navigator` implementation backed by a watch channel.
///
/// The view layer observes the receiver and renders whatever screen is
/// current. The HTTP adapter holds this as its `Navigator`, so a 401 lands
/// everyone back on the login screen without the stores getting involved.
pub struct ScreenFeed {
  tx: watch::Sender<Screen>,
}

impl ScreenFeed {
  pub fn new(initial: Screen) -> Self {
    let (tx, _rx) = watch::channel(initial);
    Self { tx }
  }

  pub fn goto(&self, screen: Screen) {
    self.tx.send_modify(|current| *current = screen);
  }

  pub fn current(&self) -> Screen {
    *self.tx.borrow()
  }

  pub fn subscribe(&self) -> watch::Receiver<Screen> {
    self.tx.subscribe()
  }
}

impl Navigator for ScreenFeed {
  fn force_login(&self) {
    tracing::warn!("forcing navigation to the login screen");
    self.goto(Screen::Login);
  }
}
