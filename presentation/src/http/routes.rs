//! Route handlers

use super::dto::{ChatRequest, ChatResponse, HealthResponse};
use super::server::AppStateArc;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use mabrur_domain::AnswerResult;
use std::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// `POST /chat` plus the legacy `POST /chatbot` alias.
pub fn chat_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chatbot", post(chat))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

/// Always answers 200. Unreadable bodies become a validation rejection,
/// provider trouble becomes a fallback.
async fn chat(
    State(state): State<AppStateArc>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let start = Instant::now();

    // Dropped together with this future when the client disconnects
    let (cancellation, _guard) = request_cancellation();

    let result = match payload {
        Ok(Json(request)) => {
            state
                .answerer
                .answer_with_cancellation(request.text(), &cancellation)
                .await
        }
        Err(rejection) => {
            debug!("Unreadable chat body: {}", rejection.body_text());
            AnswerResult::validation_rejected()
        }
    };

    Json(ChatResponse::new(result, start.elapsed()))
}

/// Token that is cancelled as soon as the returned guard is dropped.
fn request_cancellation() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::server::{AppState, router};
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use mabrur_application::{
        AnswerQuestionUseCase, InferenceProvider, KnowledgeStore, KnowledgeStoreError,
        ProviderError, RetryPolicy,
    };
    use mabrur_domain::{
        FALLBACK_MESSAGE, KnowledgeRecord, Message, SearchTerms, VALIDATION_MESSAGE,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    // ==================== Test Mocks ====================

    struct EmptyStore;

    #[async_trait]
    impl KnowledgeStore for EmptyStore {
        async fn find_active(
            &self,
            _terms: &SearchTerms,
            _limit: usize,
        ) -> Result<Vec<KnowledgeRecord>, KnowledgeStoreError> {
            Ok(Vec::new())
        }
    }

    /// Provider that echoes the user message or always fails.
    struct StubProvider {
        fail_with: Option<ProviderError>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn echo() -> Arc<Self> {
            Arc::new(Self {
                fail_with: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                fail_with: Some(error),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl InferenceProvider for StubProvider {
        fn model(&self) -> &str {
            "stub"
        }

        async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => {
                    let asked = messages.last().map_or("", |m| m.content.as_str());
                    Ok(format!("Jawaban: {}", asked))
                }
            }
        }
    }

    /// Provider whose call never finishes; records when the call is dropped.
    struct HangingProvider {
        started: Notify,
        calls: AtomicUsize,
        dropped: Arc<AtomicBool>,
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl InferenceProvider for HangingProvider {
        fn model(&self) -> &str {
            "hanging"
        }

        async fn complete(&self, _messages: &[Message]) -> Result<String, ProviderError> {
            let _flag = SetOnDrop(self.dropped.clone());
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            std::future::pending().await
        }
    }

    fn app(provider: Arc<StubProvider>) -> Router {
        let answerer = AnswerQuestionUseCase::new(Arc::new(EmptyStore), provider)
            .with_retry_policy(RetryPolicy::default().with_initial_delay(Duration::from_millis(1)));
        router(AppState::new(answerer))
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_chat_answers_message() {
        let (status, json) =
            post_json(app(StubProvider::echo()), "/chat", r#"{"message": "Niat ihram?"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "answered");
        assert_eq!(json["answer"], "Jawaban: Niat ihram?");
        assert!(json["duration_ms"].is_u64());
    }

    #[tokio::test]
    async fn test_chatbot_alias_prefers_question() {
        let (status, json) = post_json(
            app(StubProvider::echo()),
            "/chatbot",
            r#"{"message": "lama", "question": "Lokasi Jabal Rahmah?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["answer"], "Jawaban: Lokasi Jabal Rahmah?");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected_without_provider_call() {
        let provider = StubProvider::echo();
        let (status, json) = post_json(app(provider.clone()), "/chat", r#"{"message": "  "}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "validation-rejected");
        assert_eq!(json["answer"], VALIDATION_MESSAGE);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_with_200() {
        for body in ["not json", r#"{"message": 42}"#, "[]"] {
            let (status, json) = post_json(app(StubProvider::echo()), "/chat", body).await;
            assert_eq!(status, StatusCode::OK, "body {body}");
            assert_eq!(json["source"], "validation-rejected", "body {body}");
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected_with_200() {
        let response = app(StubProvider::echo())
            .oneshot(
                Request::post("/chat")
                    .body(Body::from(r#"{"message": "halo"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["source"], "validation-rejected");
    }

    #[tokio::test]
    async fn test_provider_failure_is_fallback_not_5xx() {
        let provider = StubProvider::failing(ProviderError::Status {
            status: 503,
            message: "overloaded".to_string(),
        });
        let (status, json) =
            post_json(app(provider.clone()), "/chat", r#"{"message": "Doa masuk masjid"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["answer"], FALLBACK_MESSAGE);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_question_uses_message() {
        let (status, json) = post_json(
            app(StubProvider::echo()),
            "/chat",
            r#"{"question": "  ", "message": "x"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "answered");
        assert_eq!(json["answer"], "Jawaban: x");
    }

    #[test]
    fn test_request_cancellation_fires_when_guard_dropped() {
        let (token, guard) = request_cancellation();
        assert!(!token.is_cancelled());

        drop(guard);

        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_client_disconnect_stops_inference() {
        let provider = Arc::new(HangingProvider {
            started: Notify::new(),
            calls: AtomicUsize::new(0),
            dropped: Arc::new(AtomicBool::new(false)),
        });
        let answerer = AnswerQuestionUseCase::new(Arc::new(EmptyStore), provider.clone());
        let state = Arc::new(AppState::new(answerer));

        let request = ChatRequest {
            message: None,
            question: Some("Kapan wukuf di Arafah?".to_string()),
        };
        let handler = tokio::spawn(chat(State(state), Ok(Json(request))));

        provider.started.notified().await;
        assert!(!provider.dropped.load(Ordering::SeqCst));

        // Axum drops the handler future when the connection goes away
        handler.abort();
        assert!(handler.await.unwrap_err().is_cancelled());

        assert!(provider.dropped.load(Ordering::SeqCst));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StubProvider::echo())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.status, "ok");
        assert_eq!(json.version, env!("CARGO_PKG_VERSION"));
    }
}
