use axum::Json;
use serde::Serialize;

/// Liveness probe body, in the `{code, content}` shape the API clients expect.
#[derive(Debug, Serialize)]
pub struct Probe {
    pub code: i32,
    pub content: ProbeContent,
}

#[derive(Debug, Serialize)]
pub struct ProbeContent {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<Probe> {
    Json(Probe {
        code: 0,
        content: ProbeContent {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}
