use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::countdown::job::CountdownJob;
use crate::countdown::sequence::unix_now;
use crate::foundation::error::CountdownError;
use crate::server::error::ApiError;

/// Route serving the countdown animation.
pub const COUNTDOWN_PATH: &str = "/countdown-gif";

/// Shared, immutable state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub job: Arc<CountdownJob>,
    pub pool: Arc<rayon::ThreadPool>,
}

impl AppState {
    pub fn new(job: CountdownJob, pool: rayon::ThreadPool) -> Self {
        Self {
            job: Arc::new(job),
            pool: Arc::new(pool),
        }
    }
}

/// Raw query string parameters; `endTime` stays a string so bad input can fall back.
#[derive(Debug, Default, Deserialize)]
pub struct CountdownQuery {
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
}

/// Parse `endTime` as signed decimal Unix seconds; missing or invalid input is `0`.
pub fn parse_end_time(raw: Option<&str>) -> i64 {
    match raw {
        Some(s) => s.parse::<i64>().unwrap_or_else(|_| {
            tracing::debug!(raw = s, "unparseable endTime, using 0");
            0
        }),
        None => 0,
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(COUNTDOWN_PATH, get(countdown_gif))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /countdown-gif?endTime=<unix-seconds>` -- render and return the animation.
pub async fn countdown_gif(
    State(state): State<AppState>,
    query: Result<Query<CountdownQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "malformed query string, using defaults");
            CountdownQuery::default()
        }
    };
    let end_time = parse_end_time(query.end_time.as_deref());
    let now = unix_now();

    let job = Arc::clone(&state.job);
    let pool = Arc::clone(&state.pool);
    let artifact = tokio::task::spawn_blocking(move || job.render(end_time, now, &pool))
        .await
        .map_err(|e| CountdownError::Other(anyhow::anyhow!("render task failed: {e}")))??;

    tracing::info!(
        end_time,
        frames = artifact.frame_count(),
        bytes = artifact.bytes().len(),
        artifact = %artifact.id(),
        "countdown served"
    );

    let disposition = HeaderValue::from_str(&format!(
        "inline; filename=\"{}\"",
        artifact.file_name()
    ))
    .map_err(|e| CountdownError::Other(anyhow::anyhow!("invalid content-disposition: {e}")))?;
    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static(artifact.content_type())),
        (CONTENT_DISPOSITION, disposition),
        (CACHE_CONTROL, HeaderValue::from_static("no-store")),
    ];
    Ok((StatusCode::OK, headers, artifact.into_bytes()).into_response())
}

#[cfg(test)]
#[path = "../../tests/unit/server/handler.rs"]
mod tests;
