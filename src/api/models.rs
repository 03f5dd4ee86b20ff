use serde::{Deserialize, Serialize};

/// Role code the API assigns to administrators.
pub const ADMIN_MEMBERSHIP: i32 = 2;

/// Standard `{success, data, error}` wrapper used by the voting API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub rfc: String,
    pub nombre: String,
    pub correo_electronico: String,
    pub membresia: i32,
    pub membresia_nombre: String,
    pub estatus: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.membresia == ADMIN_MEMBERSHIP
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub rfc: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(rename = "imagenS3Llave")]
    pub imagen_key: Option<String>,
    pub propuesta: Option<String>,
    #[serde(default)]
    pub activo: bool,
    pub creado_el: Option<String>,
    pub actualizado_el: Option<String>,
    pub votos_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub fecha_voto: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub ha_votado: bool,
    pub candidato: Option<Candidate>,
    pub voto: Option<Vote>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub candidato_id: i64,
}

/// Answer to a vote submission. `success == false` is a business rejection
/// (for example an account that already voted), not a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub candidato_id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(rename = "imagenS3Llave")]
    pub imagen_key: Option<String>,
    pub votos: u64,
    pub porcentaje: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStatistics {
    pub resultados: Vec<CandidateResult>,
    pub total_votos: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub voto_id: String,
    pub fecha_voto: String,
    pub usuario_id: i64,
    pub nombre_completo: String,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub rfc: String,
    pub candidato_id: i64,
    pub candidato_nombre: String,
}
