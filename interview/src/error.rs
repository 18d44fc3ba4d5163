use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Failures while reading an interview document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to parse YAML segment at index {position}: {source}")]
    Yaml {
        position: usize,
        span: Range<usize>,
        source: serde_yaml::Error,
    },
}

impl DocumentError {
    pub fn span(&self) -> Range<usize> {
        match self {
            DocumentError::Yaml { span, .. } => span.clone(),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![Label::primary(file_id, self.span())])
    }
}
