//! Answer Question use case.
//!
//! The chat-answer pipeline: validate the input, retrieve grounding context,
//! compose the prompt, call the provider resiliently, and tag the result.
//!
//! The pipeline is total. Whatever happens below it, the caller receives an
//! [`AnswerResult`] with non-empty text; provider errors are logged and
//! replaced by the fixed fallback message.

use crate::config::{RetrievalConfig, RetryPolicy};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::inference::{InferenceError, InferenceProvider};
use crate::ports::inference_observer::InferenceObserver;
use crate::ports::knowledge_store::KnowledgeStore;
use crate::use_cases::call_inference::ResilientInferenceClient;
use crate::use_cases::retrieve_context::RetrieveContextUseCase;
use mabrur_domain::util::preview;
use mabrur_domain::{AnswerResult, PromptTemplate, Question};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Map the outcome of the inference call to a tagged answer.
pub fn classify_response(result: Result<String, InferenceError>) -> AnswerResult {
    match result {
        Ok(text) => AnswerResult::answered(text),
        Err(_) => AnswerResult::fallback(),
    }
}

/// Use case for answering one pilgrim question.
///
/// Holds only immutable collaborators; one instance serves every request
/// and keeps no memory between calls, so a client-side retry is just
/// another call with the same text.
#[derive(Clone)]
pub struct AnswerQuestionUseCase {
    retriever: RetrieveContextUseCase,
    client: ResilientInferenceClient,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnswerQuestionUseCase {
    pub fn new(store: Arc<dyn KnowledgeStore>, provider: Arc<dyn InferenceProvider>) -> Self {
        Self {
            retriever: RetrieveContextUseCase::new(store),
            client: ResilientInferenceClient::new(provider),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_retrieval_config(mut self, config: RetrievalConfig) -> Self {
        self.retriever = self.retriever.with_config(config);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.client = self.client.with_policy(policy);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn InferenceObserver>) -> Self {
        self.client = self.client.with_observer(observer);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Answer raw user input.
    pub async fn answer(&self, raw_input: &str) -> AnswerResult {
        self.answer_with_cancellation(raw_input, &CancellationToken::new())
            .await
    }

    /// Answer raw user input, abandoning the provider call if `cancellation`
    /// fires (e.g. the HTTP client went away).
    pub async fn answer_with_cancellation(
        &self,
        raw_input: &str,
        cancellation: &CancellationToken,
    ) -> AnswerResult {
        let started = Instant::now();

        let question = match Question::parse(raw_input) {
            Ok(q) => q,
            Err(e) => {
                debug!("Rejected chat input: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_rejected",
                    serde_json::json!({ "reason": e.to_string() }),
                ));
                return AnswerResult::validation_rejected();
            }
        };

        info!("Answering question: {}", preview(question.content(), 80));

        let context = self.retriever.execute(&question).await;
        let messages = PromptTemplate::compose(&question, &context);
        debug!(
            "Prompt composed: {} messages, {} context snippets",
            messages.len(),
            context.len()
        );

        let outcome = self
            .client
            .call_with_cancellation(&messages, cancellation)
            .await;

        if let Err(ref e) = outcome {
            error!("Inference failed, returning fallback: {}", e);
            self.conversation_logger.log(ConversationEvent::new(
                "chat_fallback",
                serde_json::json!({
                    "model": self.client.model(),
                    "question": question.content(),
                    "error": e.to_string(),
                }),
            ));
        }

        let result = classify_response(outcome);
        let duration_ms = started.elapsed().as_millis() as u64;

        info!(
            "Answer ready: source={}, {} context snippets, {}ms",
            result.source,
            context.len(),
            duration_ms
        );

        self.conversation_logger.log(ConversationEvent::new(
            "chat_answer",
            serde_json::json!({
                "model": self.client.model(),
                "question": question.content(),
                "source": result.source.as_str(),
                "context_snippets": context.len(),
                "bytes": result.text.len(),
                "duration_ms": duration_ms,
            }),
        ));

        result
    }
}
