use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use serde::Serialize;

use crate::analysis::analyze_segment;
use crate::segment::split_blocks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Info,
    Warning,
    Error,
}

impl From<IssueLevel> for Severity {
    fn from(level: IssueLevel) -> Self {
        match level {
            IssueLevel::Info => Severity::Note,
            IssueLevel::Warning => Severity::Warning,
            IssueLevel::Error => Severity::Error,
        }
    }
}

/// A document-level problem, optionally tied to a block and a source span.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub block_id: Option<String>,
    pub level: IssueLevel,
    pub message: String,
    #[serde(skip)]
    pub span: Option<Range<usize>>,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        ValidationIssue {
            block_id: None,
            level: IssueLevel::Error,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_block(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::new(self.level.into()).with_message(&self.message);
        match &self.span {
            Some(span) => diagnostic.with_labels(vec![Label::primary(file_id, span.clone())]),
            None => diagnostic,
        }
    }
}

/// Check document-wide rules: every block must be valid YAML, and at most
/// one interview order block may be mandatory.
pub fn validate_document(document: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_mandatory = false;

    for segment in split_blocks(document) {
        let analysis = match analyze_segment(&segment) {
            Ok(analysis) => analysis,
            Err(err) => {
                issues.push(ValidationIssue::error(err.to_string()).with_span(err.span()));
                continue;
            }
        };

        if analysis.is_order && analysis.is_mandatory {
            if seen_mandatory {
                issues.push(
                    ValidationIssue::error("Only one mandatory interview_order block is allowed.")
                        .with_block(analysis.id.clone())
                        .with_span(analysis.span.clone()),
                );
            }
            seen_mandatory = true;
        }
    }

    issues
}
