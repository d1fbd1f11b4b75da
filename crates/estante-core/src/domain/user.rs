use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

/// Usuario autenticado, tal como lo describe el backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: UserId,
  pub username: String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
}

/// Respuesta de `/auth/login` y `/auth/register`.
///
/// `token` lleva `default`: un backend que conteste 2xx sin token produce la
/// cadena vacía y el servicio de sesión lo trata como login fallido en vez
/// de romper la deserialización.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
  #[serde(default)]
  pub token: String,
  pub user: User,
}

/// Credenciales de acceso del formulario de login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

/// Alta de cuenta ya validada por el formulario de registro.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
  pub username: String,
  pub email: String,
  pub password: String,
}
