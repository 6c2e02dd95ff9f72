//! Wire types for the OpenAI-compatible chat-completions API

use mabrur_application::ports::inference::ProviderError;
use mabrur_domain::Message;
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub max_tokens: u32,
    pub temperature: f32,
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Parse a successful response body into the first choice's text.
///
/// A missing choice or null content is an empty response, which the retry
/// loop treats as transient.
pub fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ProviderError::EmptyResponse)
}

/// Build a status error, preferring the provider's own `error.message`.
pub fn status_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            let body = body.trim();
            if body.is_empty() {
                "no response body".to_string()
            } else {
                mabrur_domain::util::preview(body, 200).into_owned()
            }
        });
    ProviderError::Status { status, message }
}

/// Map a transport-level reqwest error onto the provider error taxonomy.
pub fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else if error.is_decode() {
        ProviderError::MalformedResponse(error.to_string())
    } else if error.is_connect() || error.is_request() || error.is_body() {
        ProviderError::Network(error.to_string())
    } else {
        ProviderError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("persona"), Message::user("niat ihram?")];
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: 1500,
            temperature: 0.5,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 1500);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "niat ihram?");
    }

    #[test]
    fn test_parse_completion_takes_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Jawaban contoh"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "Jawaban contoh");
    }

    #[test]
    fn test_parse_completion_without_content_is_empty() {
        assert_eq!(
            parse_completion(r#"{"choices": []}"#),
            Err(ProviderError::EmptyResponse)
        );
        assert_eq!(
            parse_completion(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(ProviderError::EmptyResponse)
        );
    }

    #[test]
    fn test_parse_completion_rejects_garbage() {
        let err = parse_completion("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_error_uses_provider_message() {
        let err = status_error(
            429,
            r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#,
        );
        assert_eq!(
            err,
            ProviderError::Status {
                status: 429,
                message: "Rate limit reached".to_string()
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_status_error_falls_back_to_body() {
        let err = status_error(401, "unauthorized");
        assert_eq!(
            err,
            ProviderError::Status {
                status: 401,
                message: "unauthorized".to_string()
            }
        );
        assert!(!err.is_retryable());

        match status_error(502, "") {
            ProviderError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "no response body");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
