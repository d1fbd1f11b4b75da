use tokio::sync::watch;

use crate::domain::notification::{Severity, Toast};

/// Contenido observable de la ranura de avisos.
///
/// `seq` crece con cada `show`. Los temporizadores de auto-cierre recuerdan
/// la generación que observaron y solo pueden cerrar esa: un temporizador
/// rancio nunca oculta un mensaje más nuevo.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSlot {
  pub seq: u64,
  pub current: Option<Toast>,
}

/// Store de notificaciones: una sola ranura, el último escribe gana.
///
/// Sin cola y sin dedupe. La superficie de avisos se suscribe vía
/// [`ToastStore::subscribe`] y aplica el contrato de auto-cierre.
pub struct ToastStore {
  tx: watch::Sender<ToastSlot>,
}

impl ToastStore {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(ToastSlot { seq: 0, current: None });
    Self { tx }
  }

  /// Sobrescribe incondicionalmente el aviso vigente.
  pub fn show(&self, message: impl Into<String>, severity: Severity) {
    let toast = Toast { message: message.into(), severity };
    self.tx.send_modify(|slot| {
      slot.seq += 1;
      slot.current = Some(toast);
    });
  }

  /// Cierre manual: limpia el mensaje dejando la generación intacta.
  pub fn dismiss(&self) {
    self.tx.send_modify(|slot| slot.current = None);
  }

  /// Cierre desde un temporizador: solo borra si la ranura sigue en la
  /// generación que el temporizador observó.
  pub fn dismiss_expired(&self, seq: u64) {
    self.tx.send_modify(|slot| {
      if slot.seq == seq {
        slot.current = None;
      }
    });
  }

  pub fn current(&self) -> Option<Toast> {
    self.tx.borrow().current.clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<ToastSlot> {
    self.tx.subscribe()
  }
}

impl Default for ToastStore {
  fn default() -> Self {
    Self::new()
  }
}
