use std::sync::Arc;

use estante_core::domain::notification::Severity;
use estante_core::ports::Notifier;
use estante_core::services::ToastStore;

/// A `Notifier` implementation that bridges store events to the toast slot.
///
/// Each store service gets its own clone; they all feed the same single
/// slot, so the usual last-write-wins rules apply across stores too.
#[derive(Clone)]
pub struct ToastNotifier {
  toasts: Arc<ToastStore>,
}

impl ToastNotifier {
  pub fn new(toasts: Arc<ToastStore>) -> Self {
    Self { toasts }
  }
}

impl Notifier for ToastNotifier {
  fn notify(&self, message: &str, severity: Severity) {
    // Fire-and-forget: a full or unobserved slot never fails the caller.
    self.toasts.show(message, severity);
  }
}
