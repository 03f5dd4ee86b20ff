use axum::{
    extract::{Query, State},
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Local;
use futures_util::future::join;
use tracing::{error, info};

use crate::{
    AppState,
    error::AppError,
    notify::{self, Notice},
    report,
    session::Session,
    views::{self, stats::Dashboard},
};

use super::model::{
    DATA_REFRESHED, NOT_ENOUGH_DATA, Pagination, STATISTICS_LOAD_FAILED, StatsQuery,
    VOTERS_LOAD_FAILED,
};

#[axum::debug_handler]
pub async fn stats_page(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<StatsQuery>,
) -> impl IntoResponse {
    let (jar, mut notices) = notify::take(jar);
    let token = session.token();

    let (statistics, voters) = join(state.api.statistics(token), state.api.voters(token)).await;

    let statistics = statistics
        .inspect_err(|e| {
            error!("failed to load statistics: {}", e);
            notices.push(Notice::error(STATISTICS_LOAD_FAILED));
        })
        .ok();
    let voters = voters
        .inspect_err(|e| {
            error!("failed to load voters: {}", e);
            notices.push(Notice::error(VOTERS_LOAD_FAILED));
        })
        .ok();

    if query.refresh() {
        notices.push(Notice::success(DATA_REFRESHED));
    }

    let pagination = Pagination::new(
        voters.as_ref().map_or(0, Vec::len),
        state.config.voters_page_size,
        query.page(),
    );
    let dashboard = Dashboard {
        statistics: statistics.as_ref(),
        voters: voters.as_deref(),
        pagination,
        tab: query.tab(),
    };

    let user = session.user();
    (jar, Html(views::stats::page(user.as_ref(), &notices, &dashboard)))
}

#[axum::debug_handler]
pub async fn download_report(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let token = session.token();
    let (statistics, voters) = join(state.api.statistics(token), state.api.voters(token)).await;

    let (statistics, voters) = match (statistics, voters) {
        (Ok(statistics), Ok(voters)) if !voters.is_empty() => (statistics, voters),
        (statistics, voters) => {
            if let Err(e) = statistics {
                error!("report without statistics: {}", e);
            }
            if let Err(e) = voters {
                error!("report without voters: {}", e);
            }
            let jar = notify::flash(
                jar,
                Notice::error(NOT_ENOUGH_DATA),
                state.config.secure_cookies,
            );
            return Ok((jar, Redirect::to("/admin/estadisticas")).into_response());
        }
    };

    let generated_at = Local::now().naive_local();
    let file_name = report::file_name(generated_at);
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| AppError::Report(e.to_string()))?;

    info!(voters = voters.len(), %file_name, "report generated");
    Ok((
        [
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (CONTENT_DISPOSITION, disposition),
        ],
        report::render(&statistics, &voters, generated_at),
    )
        .into_response())
}
