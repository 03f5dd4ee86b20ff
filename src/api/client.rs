use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

use super::models::{
    AuthResponse, Candidate, Envelope, LoginRequest, User, VoteOutcome, VoteRequest, VoteStatus,
    Voter, VotingStatistics,
};

const GENERIC_REQUEST_ERROR: &str = "Error en la petición";
const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No hay token de autenticación")]
    Unauthenticated,
    #[error("{0}")]
    RequestFailed(String),
    #[error("El formato de respuesta no es válido")]
    InvalidResponse,
    #[error("No se pudo contactar al servidor de votaciones")]
    Transport(#[from] reqwest::Error),
}

/// Token and user handed out by the token endpoint.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
}

/// Client for the external voting API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_url: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        auth_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("votaciones/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_url: auth_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.api_base_url.clone(),
            config.auth_token_url.clone(),
            config.api_timeout(),
        )
    }

    /// Exchanges an RFC for a bearer token and the member record.
    pub async fn login(&self, rfc: &str) -> Result<IssuedSession, ApiError> {
        let request = self.http.post(&self.auth_url).json(&LoginRequest { rfc });
        let (status, body) = execute(request).await?;

        if !status.is_success() {
            let message = message_from_body(&body, INVALID_CREDENTIALS);
            warn!(%status, "token request rejected: {}", message);
            return Err(ApiError::RequestFailed(message));
        }

        let response: AuthResponse =
            serde_json::from_slice(&body).map_err(|_| ApiError::InvalidResponse)?;
        match response {
            AuthResponse {
                success: true,
                token: Some(token),
                user: Some(user),
                ..
            } if !token.is_empty() => {
                info!(user_id = user.id, "token issued");
                Ok(IssuedSession { token, user })
            }
            AuthResponse { error, message, .. } => Err(ApiError::RequestFailed(
                error
                    .or(message)
                    .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            )),
        }
    }

    /// Active candidates. Accepts the enveloped form and, for older API
    /// deployments, a bare array.
    pub async fn candidates(&self, token: Option<&str>) -> Result<Vec<Candidate>, ApiError> {
        let value = self.get_json("/candidatos", token).await?;

        let enveloped = value.get("success").and_then(Value::as_bool) == Some(true)
            && value.get("data").is_some_and(Value::is_array);
        let list = if enveloped {
            value.get("data").cloned().unwrap_or_default()
        } else if value.is_array() {
            value
        } else {
            warn!("unexpected candidate list shape: {}", value);
            return Err(ApiError::InvalidResponse);
        };

        serde_json::from_value(list).map_err(|e| {
            warn!("candidate list does not match the model: {}", e);
            ApiError::InvalidResponse
        })
    }

    pub async fn vote_status(
        &self,
        token: Option<&str>,
    ) -> Result<Envelope<VoteStatus>, ApiError> {
        let value = self.get_json("/voto-usuario", token).await?;
        serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse)
    }

    /// Casts the vote. A rejection by the API (already voted, closed
    /// election...) comes back as `Ok` with `success == false`.
    pub async fn submit_vote(
        &self,
        token: Option<&str>,
        candidate_id: i64,
    ) -> Result<VoteOutcome, ApiError> {
        let request = self
            .authorized(Method::POST, "/votar", token)?
            .json(&VoteRequest {
                candidato_id: candidate_id,
            });
        let (status, body) = execute(request).await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|_| ApiError::InvalidResponse);
        }

        match serde_json::from_slice::<VoteOutcome>(&body) {
            Ok(outcome) if !outcome.success => {
                info!(%status, candidate_id, "vote rejected: {:?}", outcome.error);
                Ok(outcome)
            }
            _ => {
                let message = message_from_body(&body, GENERIC_REQUEST_ERROR);
                warn!(%status, "vote submission failed: {}", message);
                Err(ApiError::RequestFailed(message))
            }
        }
    }

    pub async fn statistics(&self, token: Option<&str>) -> Result<VotingStatistics, ApiError> {
        let value = self.get_json("/resultados", token).await?;
        unwrap_envelope(value, "Error al obtener estadísticas")
    }

    pub async fn voters(&self, token: Option<&str>) -> Result<Vec<Voter>, ApiError> {
        let value = self.get_json("/lista-votantes", token).await?;
        unwrap_envelope(value, "Error al obtener lista de votantes")
    }

    fn authorized(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::Unauthenticated)?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "calling voting API");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn get_json(&self, endpoint: &str, token: Option<&str>) -> Result<Value, ApiError> {
        let request = self.authorized(Method::GET, endpoint, token)?;
        let (status, body) = execute(request).await?;

        if !status.is_success() {
            let message = message_from_body(&body, GENERIC_REQUEST_ERROR);
            warn!(endpoint, %status, "upstream request failed: {}", message);
            return Err(ApiError::RequestFailed(message));
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!(endpoint, "response is not JSON: {}", e);
            ApiError::InvalidResponse
        })
    }
}

async fn execute(request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();
    Ok((status, body))
}

fn unwrap_envelope<T: DeserializeOwned>(value: Value, fallback: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse)?;
    if !envelope.success {
        return Err(ApiError::RequestFailed(
            envelope.error.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    envelope.data.ok_or(ApiError::InvalidResponse)
}

/// Best-effort server message from an error body.
fn message_from_body(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
