use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{session::SessionError, views};

/// Failures a page handler cannot degrade into a notice.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("session store unavailable: {0}")]
    Session(#[from] SessionError),
    #[error("report rendering failed: {0}")]
    Report(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let (status, message) = match self {
            AppError::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No fue posible procesar tu sesión. Inténtalo de nuevo.",
            ),
            AppError::Report(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error al generar el reporte",
            ),
        };

        (status, Html(views::error_page(status, message))).into_response()
    }
}
