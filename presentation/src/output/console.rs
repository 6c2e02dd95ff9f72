//! Console output for answers

use colored::Colorize;
use mabrur_domain::{AnswerResult, Provenance};
use std::time::Duration;

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable answer with its provenance tag
    pub fn format(question: &str, result: &AnswerResult, elapsed: Duration) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));
        output.push_str(&Self::indent(&result.text, "  "));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {}\n",
            Self::source_label(result.source),
            format!("({}ms)", elapsed.as_millis()).dimmed()
        ));
        if result.source.is_retryable() {
            output.push_str(&format!(
                "{}\n",
                "The same question can be asked again.".dimmed()
            ));
        }

        output
    }

    /// Same fields the HTTP endpoint returns
    pub fn format_json(result: &AnswerResult, elapsed: Duration) -> String {
        let value = serde_json::json!({
            "answer": result.text,
            "source": result.source,
            "duration_ms": elapsed.as_millis() as u64,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn source_label(source: Provenance) -> String {
        let label = format!("[{}]", source);
        match source {
            Provenance::Answered => label.green().bold().to_string(),
            Provenance::Fallback => label.yellow().bold().to_string(),
            Provenance::ValidationRejected => label.red().bold().to_string(),
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
