use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    AppState,
    api::ApiError,
    notify::{self, Notice},
    session::Session,
    views,
};

use super::model::{
    Ballot, LOAD_FAILED, SELECTION_REQUIRED, VOTE_FAILED, VOTE_RECORDED, VoteForm,
};

#[axum::debug_handler]
pub async fn vote_page(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, mut notices) = notify::take(jar);
    let token = session.token();

    // status first, then the candidate list
    let ballot = match state.api.vote_status(token).await {
        Ok(status) => match state.api.candidates(token).await {
            Ok(candidates) => Ballot::from_status(status, candidates, Utc::now()),
            Err(e) => {
                error!("failed to load candidates: {}", e);
                notices.push(Notice::error(LOAD_FAILED));
                match Ballot::from_status(status, Vec::new(), Utc::now()) {
                    voted @ Ballot::Voted { .. } => voted,
                    _ => Ballot::Unavailable,
                }
            }
        },
        Err(e) => {
            error!("failed to load vote status: {}", e);
            notices.push(Notice::error(LOAD_FAILED));
            Ballot::Unavailable
        }
    };

    let user = session.user();
    (jar, Html(views::vote::page(user.as_ref(), &notices, &ballot)))
}

#[axum::debug_handler]
pub async fn cast_vote(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<VoteForm>,
) -> impl IntoResponse {
    let notice = match form.candidate_id() {
        None => Notice::error(SELECTION_REQUIRED),
        Some(candidate_id) => match state.api.submit_vote(session.token(), candidate_id).await {
            Ok(outcome) if outcome.success => {
                info!(candidate_id, "vote recorded");
                Notice::success(outcome.message.unwrap_or_else(|| VOTE_RECORDED.to_string()))
            }
            Ok(outcome) => Notice::error(outcome.error.unwrap_or_else(|| VOTE_FAILED.to_string())),
            Err(e) => {
                warn!(candidate_id, "vote submission failed: {}", e);
                match e {
                    ApiError::RequestFailed(_) | ApiError::Unauthenticated => {
                        Notice::error(e.to_string())
                    }
                    _ => Notice::error(VOTE_FAILED),
                }
            }
        },
    };

    let jar = notify::flash(jar, notice, state.config.secure_cookies);
    (jar, Redirect::to("/votar"))
}
