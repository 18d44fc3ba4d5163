use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Known block keys, in the order they are tried when classifying a block.
pub const BLOCK_TYPES: &[&str] = &[
    "question",
    "code",
    "objects",
    "features",
    "auto terms",
    "template",
    "attachment",
    "attachments",
    "table",
    "translations",
    "include",
    "default screen parts",
    "metadata",
    "modules",
    "imports",
    "sections",
    "interview help",
    "def",
    "default validation messages",
    "machine learning storage",
    "initial",
    "event",
    "comment",
    "variable name",
    "data",
    "data from code",
    "reset",
    "on change",
    "image sets",
    "images",
    "order",
];

/// Editor language for a block's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockLanguage {
    Yaml,
    Python,
    Markdown,
}

impl BlockLanguage {
    pub fn for_type(block_type: &str) -> Self {
        match block_type {
            "code" => BlockLanguage::Python,
            "def" => BlockLanguage::Markdown,
            _ => BlockLanguage::Yaml,
        }
    }
}

/// First known block key present in the mapping; `code` when none is.
pub fn guess_block_type(data: &Mapping) -> &'static str {
    BLOCK_TYPES
        .iter()
        .copied()
        .find(|key| data.contains_key(*key))
        .unwrap_or("code")
}

/// Loose truthiness used for `mandatory` flags.
pub fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1" | "on"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Human-readable label shown for a block in the editor outline.
pub fn label_for_block(block_type: &str, data: &Mapping) -> String {
    if data.get("interview_order").is_some_and(Value::is_mapping) {
        return "Interview Order".to_string();
    }

    match block_type {
        "metadata" => data
            .get("metadata")
            .and_then(|meta| meta.get("title"))
            .and_then(display_scalar)
            .unwrap_or_else(|| "Metadata".to_string()),
        "question" => match data.get("question").and_then(Value::as_str) {
            Some(question) => question.lines().next().unwrap_or_default().to_string(),
            None => "Question".to_string(),
        },
        "code" => data
            .get("code")
            .and_then(Value::as_str)
            .filter(|code| !code.is_empty())
            .map(|code| code.lines().next().unwrap_or_default().chars().take(24).collect::<String>())
            .unwrap_or_else(|| "Code".to_string()),
        "attachment" => data
            .get("attachment")
            .and_then(|payload| payload.get("name"))
            .and_then(display_scalar)
            .unwrap_or_else(|| "Attachment".to_string()),
        "event" => data
            .get("event")
            .and_then(display_scalar)
            .unwrap_or_else(|| "Event".to_string()),
        "objects" => "Objects".to_string(),
        other => other.to_string(),
    }
}

/// Scalars rendered as text; empty and falsy values count as absent.
fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        _ => None,
    }
}
