//! HTTP server for the chat endpoints

use super::routes;
use axum::Router;
use mabrur_application::AnswerQuestionUseCase;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub answerer: AnswerQuestionUseCase,
}

impl AppState {
    pub fn new(answerer: AnswerQuestionUseCase) -> Self {
        Self { answerer }
    }
}

pub type AppStateArc = Arc<AppState>;

/// Build the full router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::chat_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until `shutdown` resolves.
pub async fn run(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
