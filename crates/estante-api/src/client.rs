use std::sync::Arc;

use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use estante_core::ports::{Navigator, TokenStore};

use crate::error::ApiError;

/// Ruta del endpoint de login; su respuesta recibe trato especial en
/// [`RestClient::send`].
pub const LOGIN_PATH: &str = "/auth/login";

/// Cliente REST del backend.
///
/// Envoltorio fino sobre `reqwest`: adjunta el bearer token persistido,
/// desenvuelve el body JSON y centraliza el derribo de sesión ante un 401.
/// Sin timeouts ni reintentos: una llamada colgada se queda colgada, igual
/// que el resto del cliente.
pub struct RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  http: reqwest::Client,
  base: Url,
  tokens: Arc<T>,
  navigator: Arc<N>,
}

impl<T, N> Clone for RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  fn clone(&self) -> Self {
    Self {
      http: self.http.clone(),
      base: self.base.clone(),
      tokens: Arc::clone(&self.tokens),
      navigator: Arc::clone(&self.navigator),
    }
  }
}

impl<T, N> RestClient<T, N>
where
  T: TokenStore,
  N: Navigator,
{
  pub fn new(base_url: &str, tokens: Arc<T>, navigator: Arc<N>) -> Result<Self, ApiError> {
    let base = Url::parse(base_url)?;
    Ok(Self { http: reqwest::Client::new(), base, tokens, navigator })
  }

  /// Ejecuta `method path` contra el backend y devuelve el payload JSON
  /// desenvuelto (sin el sobre de transporte).
  ///
  /// - 401: purga el token, fuerza la vuelta al login vía [`Navigator`] y
  ///   falla con [`ApiError::Unauthorized`]. Ningún llamador necesita
  ///   gestionar sesiones rancias por su cuenta.
  /// - En [`LOGIN_PATH`], un payload con `token` se persiste aquí antes de
  ///   devolver. Canal lateral deliberado: el flujo de login cuenta con
  ///   encontrar el token ya puesto.
  pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
    let url = self.join(path)?;

    let mut request = self.http.request(method.clone(), url);

    if let Ok(Some(token)) = self.tokens.load() {
      request = request.bearer_auth(token);
    }

    if let Some(body) = body {
      request = request.json(body);
    }

    tracing::debug!(%method, path, "sending request");

    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
      return Err(self.expire_session(path));
    }

    if !status.is_success() {
      let payload = read_json_lenient(response).await;
      tracing::error!(status = status.as_u16(), path, "request failed");
      return Err(ApiError::Status { status: status.as_u16(), payload });
    }

    let payload = read_json(response).await?;

    if path == LOGIN_PATH {
      if let Some(token) = payload.get("token").and_then(Value::as_str) {
        if let Err(err) = self.tokens.store(token) {
          tracing::warn!(error = %err, "failed to persist login token");
        }
      }
    }

    Ok(payload)
  }

  fn expire_session(&self, path: &str) -> ApiError {
    tracing::warn!(path, "backend rejected the session; forcing login");

    if let Err(err) = self.tokens.clear() {
      tracing::warn!(error = %err, "failed to clear token after 401");
    }
    self.navigator.force_login();

    ApiError::Unauthorized
  }

  fn join(&self, path: &str) -> Result<Url, ApiError> {
    // base "…/api" + "/books" → "…/api/books"; Url::join descartaría el
    // último segmento de la base.
    let joined = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
    Ok(Url::parse(&joined)?)
  }
}

/// Body de éxito: vacío (p. ej. DELETE → 204) decodifica a `null`; JSON
/// inválido es un error del adaptador.
async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
  let bytes = response.bytes().await?;

  if bytes.is_empty() {
    return Ok(Value::Null);
  }

  Ok(serde_json::from_slice(&bytes)?)
}

/// Body de error: se adjunta lo que haya; un body ilegible queda en `null`.
async fn read_json_lenient(response: reqwest::Response) -> Value {
  match response.bytes().await {
    Ok(bytes) if bytes.is_empty() => Value::Null,
    Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    Err(_) => Value::Null,
  }
}
