//! Display output formatting
//!
//! Renders the dashboard fields either as plain text, one field per line,
//! or as a JSON object carrying the fields and the evaluation behind them.

use crate::api::types::{DisplayState, OutputFormat};
use crate::processing::advisory::Evaluation;
use crate::validation::error::{AdvisorError, AdvisorResult};
use serde::Serialize;

/// Formatter for a display snapshot
pub trait DisplayFormatter {
    fn format(&self, display: &DisplayState, evaluation: Option<&Evaluation>) -> AdvisorResult<String>;
}

/// One display field per line, empty fields skipped
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Prefix each block with the reading's sequence number
    pub show_sequence: bool,
}

impl DisplayFormatter for TextFormatter {
    fn format(&self, display: &DisplayState, _evaluation: Option<&Evaluation>) -> AdvisorResult<String> {
        let mut out = String::new();
        if self.show_sequence {
            if let Some(sequence) = display.last_sequence() {
                out.push_str(&format!("[{}]\n", sequence));
            }
        }
        out.push_str(&display.lines().join("\n"));
        Ok(out)
    }
}

#[derive(Serialize)]
struct JsonSnapshot<'a> {
    sequence: Option<u64>,
    display: &'a DisplayState,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<&'a Evaluation>,
}

/// Compact or pretty JSON
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl DisplayFormatter for JsonFormatter {
    fn format(&self, display: &DisplayState, evaluation: Option<&Evaluation>) -> AdvisorResult<String> {
        let snapshot = JsonSnapshot {
            sequence: display.last_sequence(),
            display,
            evaluation,
        };
        let result = if self.pretty {
            serde_json::to_string_pretty(&snapshot)
        } else {
            serde_json::to_string(&snapshot)
        };
        result.map_err(|e| AdvisorError::Parse {
            source_name: "display snapshot".to_string(),
            message: e.to_string(),
        })
    }
}

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn DisplayFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::default()),
        OutputFormat::Json => Box::new(JsonFormatter::default()),
    }
}
