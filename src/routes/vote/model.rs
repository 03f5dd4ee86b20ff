use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::models::{Candidate, Envelope, VoteStatus};
use crate::utils::{parse_timestamp, time_ago};

pub const LOAD_FAILED: &str = "Error al cargar los datos. Inténtalo de nuevo.";
pub const SELECTION_REQUIRED: &str = "Debes seleccionar un candidato para votar";
pub const VOTE_FAILED: &str = "Ocurrió un error al procesar tu voto";
pub const VOTE_RECORDED: &str = "Voto registrado con éxito";

/// What the ballot page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Ballot {
    /// The member already voted; `voted_ago` is relative wording such as
    /// "hace 5 minutos".
    Voted {
        candidate: Option<Candidate>,
        voted_ago: Option<String>,
    },
    Open { candidates: Vec<Candidate> },
    Unavailable,
}

impl Ballot {
    /// A status the API did not confirm counts as "not voted yet".
    pub fn from_status(
        status: Envelope<VoteStatus>,
        candidates: Vec<Candidate>,
        now: DateTime<Utc>,
    ) -> Self {
        match status.data.filter(|_| status.success) {
            Some(VoteStatus {
                ha_votado: true,
                candidato,
                voto,
            }) => Ballot::Voted {
                candidate: candidato,
                voted_ago: voto
                    .and_then(|vote| parse_timestamp(&vote.fecha_voto))
                    .map(|at| time_ago(at.with_timezone(&Utc), now)),
            },
            _ => Ballot::Open { candidates },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub candidato_id: Option<String>,
}

impl VoteForm {
    pub fn candidate_id(&self) -> Option<i64> {
        self.candidato_id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }
}
