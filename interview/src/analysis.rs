use std::ops::Range;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use order::InterviewOrderAst;

use crate::block_type::{BlockLanguage, coerce_bool, guess_block_type, label_for_block};
use crate::error::DocumentError;
use crate::segment::{Segment, split_blocks};

/// Summary of one document block as presented to the editor.
#[derive(Debug, Clone, Serialize)]
pub struct BlockAnalysis {
    /// `<type>-<position>`.
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub label: Option<String>,
    pub language: BlockLanguage,
    pub position: usize,
    /// Non-blank, non-comment lines of the order code, trimmed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_items: Vec<String>,
    #[serde(rename = "isMandatory")]
    pub is_mandatory: bool,
    /// Whether the block was recognized as the interview order.
    #[serde(rename = "isOrder")]
    pub is_order: bool,
    /// The structured plan, when this block is the interview order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<InterviewOrderAst>,
    #[serde(skip)]
    pub span: Range<usize>,
}

/// Split a document and analyze every block.
pub fn analyze_blocks(document: &str) -> Result<Vec<BlockAnalysis>, DocumentError> {
    split_blocks(document).iter().map(analyze_segment).collect()
}

/// Classify one segment, attaching its extracted order plan when the block
/// is recognized as the interview order.
pub fn analyze_segment(segment: &Segment) -> Result<BlockAnalysis, DocumentError> {
    let data = parse_mapping(segment)?;

    let block_type = guess_block_type(&data);
    let id = format!("{block_type}-{}", segment.position);
    let mut label = label_for_block(block_type, &data);

    // A nested `interview_order:` mapping carries its own code and flag.
    let nested = data.get("interview_order").and_then(Value::as_mapping);
    let source = nested.unwrap_or(&data);
    let is_mandatory = coerce_bool(source.get("mandatory"));

    let declared_id = data.get("id").and_then(Value::as_str).unwrap_or(&id);
    let is_order = nested.is_some()
        || order::looks_like_order(&segment.text, declared_id, Some(label.as_str()));

    let (order_items, order) = if is_order {
        label = "Interview Order".to_string();
        let items = source
            .get("code")
            .and_then(Value::as_str)
            .map(order_items_from_code)
            .unwrap_or_default();
        (items, order::extract(&segment.text))
    } else {
        (Vec::new(), None)
    };

    debug!(%id, block_type, is_order, "analyzed block");

    Ok(BlockAnalysis {
        id,
        block_type: block_type.to_string(),
        label: Some(label),
        language: BlockLanguage::for_type(block_type),
        position: segment.position,
        order_items,
        is_mandatory,
        is_order,
        order,
        span: segment.span.clone(),
    })
}

/// Parse a segment as YAML. Empty and non-mapping documents read as an
/// empty mapping.
fn parse_mapping(segment: &Segment) -> Result<Mapping, DocumentError> {
    let value: Value =
        serde_yaml::from_str(&segment.text).map_err(|source| DocumentError::Yaml {
            position: segment.position,
            span: segment.span.clone(),
            source,
        })?;

    Ok(match value {
        Value::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    })
}

fn order_items_from_code(code: &str) -> Vec<String> {
    code.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
