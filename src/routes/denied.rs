use axum::{http::StatusCode, response::Html};

use crate::views;

pub async fn denied() -> (StatusCode, Html<String>) {
    (StatusCode::FORBIDDEN, Html(views::denied::page()))
}
