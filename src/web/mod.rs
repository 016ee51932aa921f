//! HTTP boundary: HTML form, JSON API and health routes

mod handlers;
mod pages;

use crate::error::{PassGenError, Result};
use crate::generator::PasswordGenerator;
use crate::store::PasswordStore;
use crate::types::{GenerationOptions, ServerConfig};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use warp::filters::BoxedFilter;
use warp::Filter;

/// State shared by every request handler
#[derive(Clone, Debug)]
pub struct AppState {
    generator: PasswordGenerator,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn PasswordStore>, config: &ServerConfig) -> Self {
        Self {
            generator: PasswordGenerator::with_config(store, config.generator.clone()),
            request_timeout: config.request_timeout,
        }
    }

    pub fn generator(&self) -> &PasswordGenerator {
        &self.generator
    }

    /// Run one generation on a blocking thread under the request deadline.
    pub async fn generate(&self, options: GenerationOptions) -> Result<String> {
        let generator = self.generator.clone();
        let task = tokio::task::spawn_blocking(move || generator.generate(&options));

        match tokio::time::timeout(self.request_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(crate::internal_error!("generation task failed: {}", e)),
            Err(_) => Err(PassGenError::timeout(
                "Password generation",
                self.request_timeout.as_secs(),
            )),
        }
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Maximum accepted request body
const MAX_BODY_SIZE: u64 = 16 * 1024;

/// All routes served by the password service
pub fn routes(state: AppState) -> BoxedFilter<(impl warp::Reply,)> {
    let get_form = warp::path::end()
        .and(warp::get())
        .and_then(handlers::handle_get_form);

    let post_form = warp::path::end()
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::form::<Vec<(String, String)>>())
        .and(with_state(state.clone()))
        .and_then(handlers::handle_post_form);

    let post_api = warp::path!("api" / "v1" / "passwords")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::json::<handlers::PasswordRequest>())
        .and(with_state(state.clone()))
        .and_then(handlers::handle_post_password)
        .recover(handlers::handle_rejection);

    let get_stats = warp::path!("api" / "v1" / "stats")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::handle_get_stats);

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handlers::handle_health);

    get_form
        .or(post_form)
        .or(post_api)
        .or(get_stats)
        .or(health)
        .with(warp::trace::request())
        .boxed()
}

/// Serve until Ctrl-C
pub async fn serve(config: ServerConfig, store: Arc<dyn PasswordStore>) -> Result<()> {
    let addr = config.bind_address()?;
    let state = AppState::new(store, &config);

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .map_err(|e| PassGenError::io(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(
        addr = %bound,
        timeout_secs = config.request_timeout.as_secs(),
        max_attempts = ?config.generator.max_attempts,
        "Password server listening"
    );
    server.await;
    tracing::info!("Password server stopped");

    Ok(())
}
