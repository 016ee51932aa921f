//! Route handlers

use super::{pages, AppState};
use crate::error::{PassGenError, Result};
use crate::request;
use crate::types::GenerationOptions;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// JSON body of `POST /api/v1/passwords`
///
/// `length` stays untyped so that a string or fractional length is reported
/// as an invalid length rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub length: Value,
    #[serde(default)]
    pub sets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PasswordResponse {
    password: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

impl PasswordRequest {
    fn into_options(self) -> Result<GenerationOptions> {
        let length = match &self.length {
            Value::String(raw) => request::parse_length(raw)?,
            other => other
                .as_u64()
                .and_then(|length| usize::try_from(length).ok())
                .filter(|length| *length > 0)
                .ok_or_else(|| PassGenError::invalid_length(other.to_string()))?,
        };
        let classes = request::parse_classes(&self.sets)?;
        Ok(GenerationOptions::new(length, classes))
    }
}

fn status_of(err: &PassGenError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_reply(err: &PassGenError) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: err.user_message(),
            kind: err.kind(),
        }),
        status_of(err),
    )
}

/// Answer JSON bodies that fail to deserialize with the API error shape
pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Rejection> {
    if let Some(e) = err.find::<BodyDeserializeError>() {
        tracing::debug!(error = %e, "Rejected malformed password request");
        Ok(error_reply(&PassGenError::malformed_request(e.to_string())))
    } else {
        Err(err)
    }
}

#[tracing::instrument(level = "debug", name = "GET /", skip_all)]
pub async fn handle_get_form() -> std::result::Result<impl Reply, warp::Rejection> {
    Ok(warp::reply::html(pages::form_page()))
}

#[tracing::instrument(level = "debug", name = "POST /", skip_all)]
pub async fn handle_post_form(
    fields: Vec<(String, String)>,
    state: AppState,
) -> std::result::Result<impl Reply, warp::Rejection> {
    let result = match request::parse_form(&fields) {
        Ok(options) => state.generate(options).await,
        Err(e) => Err(e),
    };

    let reply = match result {
        Ok(password) => {
            warp::reply::with_status(warp::reply::html(pages::result_page(&password)), StatusCode::OK)
        }
        Err(e) => warp::reply::with_status(
            warp::reply::html(pages::error_page(&e.user_message())),
            status_of(&e),
        ),
    };
    Ok(reply)
}

#[tracing::instrument(level = "debug", name = "POST /api/v1/passwords", skip_all)]
pub async fn handle_post_password(
    body: PasswordRequest,
    state: AppState,
) -> std::result::Result<impl Reply, warp::Rejection> {
    let result = match body.into_options() {
        Ok(options) => state.generate(options).await,
        Err(e) => Err(e),
    };

    let reply = match result {
        Ok(password) => warp::reply::with_status(
            warp::reply::json(&PasswordResponse { password }),
            StatusCode::OK,
        ),
        Err(e) => error_reply(&e),
    };
    Ok(reply)
}

#[tracing::instrument(level = "debug", name = "GET /api/v1/stats", skip_all)]
pub async fn handle_get_stats(state: AppState) -> std::result::Result<impl Reply, warp::Rejection> {
    let generator = state.generator();
    let metrics = generator.get_metrics_snapshot();

    Ok(warp::reply::json(&json!({
        "issued": generator.store().len(),
        "metrics": metrics,
        "collisionRate": metrics.collision_rate(),
    })))
}

pub async fn handle_health() -> std::result::Result<impl Reply, warp::Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "ok",
        "version": crate::VERSION,
    })))
}
