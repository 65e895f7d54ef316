use crate::client::{is_browser, user_agent, BROWSER_HINT, USAGE};
use crate::params::parse_stream_params;
use crate::AppState;
use ascii_metrics::TracingService;
use ascii_models::{BannerKind, ErrorShape, StreamerError};
use ascii_render::{frame_stream, Banner};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use futures::StreamExt;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::{error, instrument, warn};
use uuid::Uuid;

pub type ApiError = (StatusCode, Json<ErrorShape>);

fn error_response(e: &StreamerError) -> ApiError {
    let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(e.to_error_shape()))
}

fn browser_hint(state: &AppState, path: &str, headers: &HeaderMap) -> Response {
    state.metrics.record_browser_hint();
    TracingService::log_browser_hint(path, &user_agent(headers));
    BROWSER_HINT.into_response()
}

#[instrument(skip(state, headers))]
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if is_browser(&headers) {
        return browser_hint(&state, "/", &headers);
    }
    USAGE.into_response()
}

pub async fn health_check() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
pub async fn list_animations(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    match state.registry.validate() {
        Ok(()) => Ok(Json(state.registry.names())),
        Err(e) => {
            error!("Animation registry is invalid: {}", e);
            Err(error_response(&e))
        }
    }
}

#[instrument(skip(state, query, headers))]
pub async fn stream_animation(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    match open_stream(&state, &name, &query, &headers).await {
        Ok(response) => Ok(response),
        Err(e) => {
            if e.http_status() >= 500 {
                error!("Failed to stream animation {}: {}", name, e);
            } else {
                warn!("Rejected stream request for {}: {}", name, e);
            }
            state.metrics.record_rejection(&e);
            Err(error_response(&e))
        }
    }
}

async fn open_stream(
    state: &AppState,
    name: &str,
    query: &HashMap<String, String>,
    headers: &HeaderMap,
) -> Result<Response, StreamerError> {
    let params = parse_stream_params(query, &state.config.stream)?;

    if is_browser(headers) {
        return Ok(browser_hint(state, &format!("/a/{}", name), headers));
    }

    let anim = state
        .registry
        .get(name)
        .ok_or_else(|| StreamerError::AnimationNotFound {
            name: name.to_string(),
        })?;

    // Load before answering so asset errors get a status code instead of a cut stream.
    let frames = state.frames.load_animation(anim).await?;

    let banner_kind = params.banner.unwrap_or(anim.banner_kind);
    let pad = state.config.stream.banner_padding;
    let banner = match banner_kind {
        BannerKind::Big => Banner::big(pad),
        BannerKind::Ticker => Banner::ticker(&anim.banner_text, pad),
    };

    let stream_id = Uuid::new_v4().to_string();
    TracingService::log_stream_started(
        &anim.name,
        &stream_id,
        params.delay_secs,
        &banner_kind.to_string(),
    );
    let mut guard = state.metrics.stream_started(&anim.name, &stream_id);

    let body = frame_stream(frames, banner, anim.color, &params).map(move |chunk| {
        guard.chunk_sent();
        Ok::<_, Infallible>(chunk)
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(body))
        .map_err(|e| StreamerError::Internal {
            reason: e.to_string(),
        })
}

#[instrument(skip(state))]
pub async fn metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    match state.metrics.get_prometheus_metrics() {
        Ok(metrics) => Ok(metrics),
        Err(e) => {
            error!("Failed to get metrics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
