use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::InterviewOrderAst;
use crate::decompile::parse_block;
use crate::detect::looks_like_order;

/// Identifier used when the block carries no `id:` line.
pub const FALLBACK_ID: &str = "interview_order";

static ID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*id:[ \t]*(\S.*?)[ \t]*$").expect("id pattern"));

static MANDATORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*mandatory:[ \t]*(\S+)[ \t]*$").expect("mandatory pattern")
});

/// Column-0 `code:` header with an optional literal-block indicator.
static CODE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^code:[ \t]*(?:\|[-+]?)?[ \t]*$").expect("code header pattern")
});

/// `code:` header at any indentation, with anything after the colon.
static LENIENT_CODE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)code:.*$").expect("lenient code header pattern"));

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pull a structured order out of the raw text of one block.
///
/// Returns `None` when no code payload can be located; the caller should
/// then offer the raw block for manual editing.
pub fn extract(block_text: &str) -> Option<InterviewOrderAst> {
    let id = read_id(block_text).unwrap_or_else(|| FALLBACK_ID.to_string());

    let Some(payload) = strict_payload(block_text).or_else(|| lenient_payload(block_text)) else {
        debug!(%id, "no code payload found");
        return None;
    };

    let payload = dedent(&payload);
    let lines: Vec<&str> = payload.lines().collect();
    let nodes = parse_block(&lines, &mut 0, 0);
    debug!(%id, nodes = nodes.len(), "extracted interview order");

    Some(InterviewOrderAst {
        id,
        mandatory: true,
        nodes,
    })
}

/// Detect, then extract: `None` unless the block looks like the order block
/// and a payload can be found.
pub fn extract_order(block_text: &str, id: &str, label: Option<&str>) -> Option<InterviewOrderAst> {
    if !looks_like_order(block_text, id, label) {
        return None;
    }
    extract(block_text)
}

/// The block's own `mandatory:` value, when it has a readable one.
pub fn read_mandatory(block_text: &str) -> Option<bool> {
    let caps = MANDATORY_LINE.captures(block_text)?;
    match caps[1].trim_matches(['"', '\'']).to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Payload location
// ---------------------------------------------------------------------------

fn read_id(block_text: &str) -> Option<String> {
    let caps = ID_LINE.captures(block_text)?;
    let id = caps[1].trim_matches(['"', '\'']).trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Lines after a column-0 `code:` header, as long as they are indented or
/// blank. At least one indented line is required.
fn strict_payload(block_text: &str) -> Option<String> {
    let header = CODE_HEADER.find(block_text)?;
    let lines: Vec<&str> = block_text[header.end()..]
        .lines()
        .skip(1)
        .take_while(|line| line.trim().is_empty() || line.starts_with([' ', '\t']))
        .collect();
    has_content(&lines).then(|| lines.join("\n"))
}

/// Lines after a `code:` header at any depth, up to the first non-blank line
/// that is not indented past the header.
fn lenient_payload(block_text: &str) -> Option<String> {
    let caps = LENIENT_CODE_HEADER.captures(block_text)?;
    let header_indent = caps.get(1).map_or(0, |m| m.as_str().len());
    let rest = caps.get(0).map_or("", |m| &block_text[m.end()..]);
    let lines: Vec<&str> = rest
        .lines()
        .skip(1)
        .take_while(|line| line.trim().is_empty() || indent_of(line) > header_indent)
        .collect();
    has_content(&lines).then(|| lines.join("\n"))
}

fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|line| !line.trim().is_empty())
}

/// Remove the indentation shared by every non-blank line.
fn dedent(payload: &str) -> String {
    let shared = payload
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_of)
        .min()
        .unwrap_or(0);

    payload
        .lines()
        .map(|line| line.get(shared..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}
