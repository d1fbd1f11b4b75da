/// Salto de pantalla forzado desde fuera de la capa de vistas.
///
/// Lo invoca el adaptador HTTP cuando la sesión caduca (401): el usuario
/// debe volver al login sin que cada llamador gestione sesiones rancias.
pub trait Navigator: Send + Sync {
  fn force_login(&self);
}
