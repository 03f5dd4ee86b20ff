use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::{
    AppState,
    notify::{self, Notice},
    session::Session,
};

pub const LOGIN_REQUIRED: &str = "Debes iniciar sesión para acceder a esta página";
pub const ADMIN_REQUIRED: &str = "No tienes permisos para acceder a esta página";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardOptions {
    pub admin_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No session; back to the login page.
    Unauthenticated,
    /// Logged in without the administrator role; back to the ballot.
    Forbidden,
}

impl Access {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Access::Granted => None,
            Access::Unauthenticated => Some("/"),
            Access::Forbidden => Some("/votar"),
        }
    }
}

/// Decides from the session alone, on every request.
pub fn check_access(session: &Session, options: GuardOptions) -> Access {
    if !session.is_authenticated() {
        Access::Unauthenticated
    } else if options.admin_only && !session.is_admin() {
        Access::Forbidden
    } else {
        Access::Granted
    }
}

pub async fn require_member(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    guard(state, GuardOptions { admin_only: false }, req, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    guard(state, GuardOptions { admin_only: true }, req, next).await
}

async fn guard(
    state: AppState,
    options: GuardOptions,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let session = Session::load(state.sessions.as_ref(), &jar).await;

    let access = check_access(&session, options);
    let message = match access {
        Access::Granted => {
            req.extensions_mut().insert(session);
            return next.run(req).await;
        }
        Access::Unauthenticated => LOGIN_REQUIRED,
        Access::Forbidden => ADMIN_REQUIRED,
    };
    let target = access.redirect_target().unwrap_or("/");

    info!(path = %req.uri().path(), ?access, "access denied, redirecting to {}", target);
    let jar = notify::flash(jar, Notice::error(message), state.config.secure_cookies);
    (jar, Redirect::to(target)).into_response()
}
