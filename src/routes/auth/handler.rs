use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::{
    AppState,
    api::ApiError,
    error::AppError,
    notify::{self, Notice},
    session::{self, Session},
    views,
};

use super::model::{AUTH_FAILED, AUTH_SUCCESS, LoginForm, landing_for};

#[axum::debug_handler(state = AppState)]
pub async fn login_page(session: Session, jar: CookieJar) -> Response {
    if let Some(user) = session.user().filter(|_| session.is_authenticated()) {
        return Redirect::to(landing_for(&user)).into_response();
    }

    let (jar, notices) = notify::take(jar);
    (jar, Html(views::login::page(&notices, "", None))).into_response()
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let rfc = match form.validate() {
        Ok(rfc) => rfc,
        Err(message) => {
            let page = views::login::page(&[], &form.rfc, Some(message));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    let issued = match state.api.login(rfc).await {
        Ok(issued) => issued,
        Err(e) => {
            warn!("sign-in failed: {}", e);
            let (status, message) = match &e {
                ApiError::RequestFailed(message) => (StatusCode::UNAUTHORIZED, message.as_str()),
                _ => (StatusCode::BAD_GATEWAY, AUTH_FAILED),
            };
            let page = views::login::page(&[], rfc, Some(message));
            return Ok((status, Html(page)).into_response());
        }
    };

    // never reuse an id issued before authentication
    let jar = session::end(state.sessions.as_ref(), &session, jar).await?;
    let cookie = session::start(
        state.sessions.as_ref(),
        &issued,
        state.config.session_ttl(),
        state.config.secure_cookies,
    )
    .await?;

    info!(
        user_id = issued.user.id,
        admin = issued.user.is_admin(),
        "member signed in"
    );
    let jar = notify::flash(
        jar.add(cookie),
        Notice::success(AUTH_SUCCESS),
        state.config.secure_cookies,
    );
    Ok((jar, Redirect::to(landing_for(&issued.user))).into_response())
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let jar = session::end(state.sessions.as_ref(), &session, jar).await?;
    if let Some(user) = session.user() {
        info!(user_id = user.id, "member signed out");
    }
    Ok((jar, Redirect::to("/")))
}
