//! A stand-in for the voting API plus a tiny cookie-keeping browser.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use votaciones::{
    AppState, api::ApiClient, config::Config, router::create_router, session::MemorySessionStore,
};

pub const ADMIN_RFC: &str = "ADMIN800101AAA";
pub const MEMBER_RFC: &str = "MEMB800101BBB";
pub const ALLOWED_IP: &str = "10.1.2.3";

#[derive(Default)]
pub struct Upstream {
    /// token -> candidate voted for
    pub votes: HashMap<String, i64>,
    pub bare_candidates: bool,
    pub malformed_candidates: bool,
    pub statistics_down: bool,
}

pub struct FakeApi {
    pub base_url: String,
    pub auth_url: String,
    pub upstream: Arc<Mutex<Upstream>>,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        let upstream = Arc::new(Mutex::new(Upstream::default()));
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/api/votacion/candidatos", get(candidates))
            .route("/api/votacion/voto-usuario", get(vote_status))
            .route("/api/votacion/votar", post(vote))
            .route("/api/votacion/resultados", get(results))
            .route("/api/votacion/lista-votantes", get(voters))
            .with_state(upstream.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api/votacion", addr),
            auth_url: format!("http://{}/api/token", addr),
            upstream,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(
            self.base_url.clone(),
            self.auth_url.clone(),
            std::time::Duration::from_secs(5),
        )
        .unwrap()
    }

    pub fn config(&self) -> Config {
        let vars: HashMap<&str, String> = HashMap::from([
            ("API_BASE_URL", self.base_url.clone()),
            ("AUTH_TOKEN_URL", self.auth_url.clone()),
            ("ALLOWED_NETWORKS", "10.0.0.0/8, 201.138.6.68/32".to_string()),
            ("VOTERS_PAGE_SIZE", "10".to_string()),
        ]);
        Config::from_vars(|key| vars.get(key).cloned()).unwrap()
    }

    pub fn router(&self) -> Router {
        let config = self.config();
        let state = AppState {
            api: ApiClient::from_config(&config).unwrap(),
            config: Arc::new(config),
            sessions: Arc::new(MemorySessionStore::new()),
        };
        create_router(state)
    }
}

fn user(rfc: &str) -> Option<Value> {
    let (id, nombre, membresia, membresia_nombre) = match rfc {
        ADMIN_RFC => (1, "Ana Administradora", 2, "Administrador"),
        MEMBER_RFC => (2, "Juan Pérez", 1, "Titular"),
        _ => return None,
    };
    Some(json!({
        "id": id,
        "rfc": rfc,
        "nombre": nombre,
        "correoElectronico": format!("{}@amce.org.mx", id),
        "membresia": membresia,
        "membresiaNombre": membresia_nombre,
        "estatus": "activo"
    }))
}

fn candidate(id: i64) -> Value {
    let nombre = match id {
        1 => "Laura Martínez Soto",
        2 => "Pedro Ruiz Gómez",
        _ => "Carla Núñez Paz",
    };
    json!({
        "id": id,
        "nombre": nombre,
        "descripcion": "Contadora pública",
        "imagenS3Llave": null,
        "propuesta": "Transparencia",
        "activo": true
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .filter(|token| token.starts_with("token-"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token inválido"})),
    )
        .into_response()
}

async fn token(Json(body): Json<Value>) -> Response {
    let rfc = body.get("rfc").and_then(Value::as_str).unwrap_or_default();
    match user(rfc) {
        Some(user) => Json(json!({
            "success": true,
            "token": format!("token-{}", rfc),
            "user": user
        }))
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "RFC no registrado"})),
        )
            .into_response(),
    }
}

async fn candidates(State(upstream): State<Arc<Mutex<Upstream>>>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let upstream = upstream.lock().unwrap();
    let list: Vec<Value> = (1..=3).map(candidate).collect();
    if upstream.malformed_candidates {
        Json(json!({"candidatos": list})).into_response()
    } else if upstream.bare_candidates {
        Json(json!(list)).into_response()
    } else {
        Json(json!({"success": true, "data": list})).into_response()
    }
}

async fn vote_status(State(upstream): State<Arc<Mutex<Upstream>>>, headers: HeaderMap) -> Response {
    let Some(token) = bearer(&headers) else {
        return unauthorized();
    };
    let upstream = upstream.lock().unwrap();
    let data = match upstream.votes.get(&token) {
        Some(id) => json!({
            "haVotado": true,
            "candidato": candidate(*id),
            "voto": {"id": "v-1", "fechaVoto": chrono::Utc::now().to_rfc3339()}
        }),
        None => json!({"haVotado": false, "candidato": null, "voto": null}),
    };
    Json(json!({"success": true, "data": data})).into_response()
}

async fn vote(
    State(upstream): State<Arc<Mutex<Upstream>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(token) = bearer(&headers) else {
        return unauthorized();
    };
    let Some(candidate_id) = body.get("candidatoId").and_then(Value::as_i64) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Candidato inválido"})),
        )
            .into_response();
    };

    let mut upstream = upstream.lock().unwrap();
    if upstream.votes.contains_key(&token) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Ya has emitido tu voto"})),
        )
            .into_response();
    }
    upstream.votes.insert(token, candidate_id);
    Json(json!({"success": true, "message": "Tu voto fue registrado"})).into_response()
}

async fn results(State(upstream): State<Arc<Mutex<Upstream>>>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    if upstream.lock().unwrap().statistics_down {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"success": false, "error": "Servicio no disponible"})),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "data": {
            "resultados": [
                {"candidatoId": 1, "nombre": "Laura Martínez Soto", "votos": 10, "porcentaje": 25.0},
                {"candidatoId": 2, "nombre": "Pedro Ruiz Gómez", "votos": 25, "porcentaje": 62.5},
                {"candidatoId": 3, "nombre": "Carla Núñez Paz", "votos": 5, "porcentaje": 12.5}
            ],
            "totalVotos": 40
        }
    }))
    .into_response()
}

async fn voters(headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let list: Vec<Value> = (1..=23)
        .map(|n| {
            json!({
                "votoId": format!("v-{}", n),
                "fechaVoto": "2025-03-05T10:15:00Z",
                "usuarioId": n,
                "nombreCompleto": format!("Votante {:02}", n),
                "apellidoPaterno": null,
                "apellidoMaterno": null,
                "rfc": format!("RFC{:02}", n),
                "candidatoId": 2,
                "candidatoNombre": "Pedro Ruiz Gómez"
            })
        })
        .collect();
    Json(json!({"success": true, "data": list})).into_response()
}

/// Keeps cookies between requests the way a browser would.
pub struct Browser {
    app: Router,
    ip: String,
    cookies: HashMap<String, String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self::from_ip(app, ALLOWED_IP)
    }

    pub fn from_ip(app: Router, ip: &str) -> Self {
        Self {
            app,
            ip: ip.to_string(),
            cookies: HashMap::new(),
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn send(&mut self, mut req: Request<Body>) -> Response {
        req.headers_mut()
            .insert("x-forwarded-for", self.ip.parse().unwrap());
        if !self.cookies.is_empty() {
            let header_value = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            req.headers_mut()
                .insert(header::COOKIE, header_value.parse().unwrap());
        }

        let response = self.app.clone().oneshot(req).await.unwrap();
        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let expired = raw.contains("Max-Age=0") || value.is_empty();
            if expired {
                self.cookies.remove(name.trim());
            } else {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }
        response
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
