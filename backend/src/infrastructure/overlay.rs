use std::sync::Arc;
use std::time::Duration;

use estante_core::services::ToastStore;
use tokio::task::JoinHandle;

/// Delay fijo antes de ocultar un aviso que nadie cerró a mano.
pub const AUTO_DISMISS: Duration = Duration::from_millis(3000);

/// Consumer side of the toast slot.
///
/// Watches the slot and hides a message `duration` after it began observing
/// it. The generation guard in the store means a timer armed for an old
/// message can never hide a newer one; a manual dismissal (or any new
/// message) cancels the pending timer through the watch wakeup.
pub struct ToastOverlay {
  toasts: Arc<ToastStore>,
  duration: Duration,
}

impl ToastOverlay {
  pub fn new(toasts: Arc<ToastStore>) -> Self {
    Self { toasts, duration: AUTO_DISMISS }
  }

  /// Duración alternativa, para tests.
  pub fn with_duration(toasts: Arc<ToastStore>, duration: Duration) -> Self {
    Self { toasts, duration }
  }

  pub fn spawn(self) -> JoinHandle<()> {
    let mut rx = self.toasts.subscribe();
    let toasts = self.toasts;
    let duration = self.duration;

    tokio::spawn(async move {
      loop {
        let (seq, visible) = {
          let slot = rx.borrow_and_update();
          (slot.seq, slot.current.is_some())
        };

        if visible {
          tokio::select! {
            _ = tokio::time::sleep(duration) => toasts.dismiss_expired(seq),
            changed = rx.changed() => {
              if changed.is_err() {
                break;
              }
            }
          }
        } else if rx.changed().await.is_err() {
          break;
        }
      }
    })
  }
}
