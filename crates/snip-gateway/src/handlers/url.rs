use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use snip_core::{LinkStats, ShortCode};
use tracing::info;

/// `POST /api/shorten`
///
/// The body is parsed as JSON whatever the `Content-Type`; a missing or
/// malformed body, or anything other than a JSON object, is treated like a
/// missing URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ShortenResponse>> {
    // Struct deserialization would also take `["..."]`; only objects count.
    let object: Map<String, Value> = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidUrl(format!("request body is not a json object: {e}")))?;
    let request: ShortenRequest = serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::InvalidUrl(format!("unreadable request body: {e}")))?;
    let url = request
        .url
        .ok_or_else(|| AppError::InvalidUrl("missing url field".to_string()))?;

    let shortened = state.shortener().shorten(&url).await?;
    Ok(Json(shortened.into()))
}

/// `GET /{code}`: 302 to the stored URL, counting the click.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A malformed code can never have been issued.
    let code = ShortCode::new(code).map_err(|_| AppError::NotFound)?;

    let url = state
        .redirector()
        .resolve(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    let location = HeaderValue::try_from(url.as_str()).map_err(|e| {
        AppError::Internal(format!("stored url for '{code}' is not a valid header: {e}"))
    })?;

    info!(code = %code, url = %url, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// `GET /api/stats/{code}`
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStats>> {
    let code = ShortCode::new(code).map_err(|_| AppError::NotFound)?;

    let stats = state
        .stats()
        .get_stats(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(stats))
}
