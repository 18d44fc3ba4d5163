mod patterns;

use tracing::trace;

use crate::emit::PLACEHOLDER;
use crate::node::{Node, SnapshotArgs};

use patterns::{
    FOR_HEADER, GATHER, IF_HEADER, PROGRESS, RUN_ONCE_GUARD, SECTION, SNAPSHOT_OPEN, paren_delta,
    unescape,
};

const STEP: usize = 2;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reconstruct a node sequence from scripted text. The shallowest statement
/// indentation is taken as the top level.
///
/// This is a best-effort, line-oriented reader: it never fails, and any line
/// it does not recognize becomes an ASK step.
pub fn decompile(text: &str) -> Vec<Node> {
    let lines: Vec<&str> = text.lines().collect();
    let base = lines
        .iter()
        .filter(|line| !is_skippable(line.trim()))
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);
    let mut cursor = 0;
    parse_block(&lines, &mut cursor, base)
}

/// Parse the block starting at `cursor` whose statements sit at
/// `target_indent`. Returns when a line indented less than the target is
/// reached, leaving `cursor` on that line.
pub fn parse_block(lines: &[&str], cursor: &mut usize, target_indent: usize) -> Vec<Node> {
    let mut nodes = Vec::new();

    while let Some(&raw) = lines.get(*cursor) {
        let trimmed = raw.trim();
        if is_skippable(trimmed) {
            *cursor += 1;
            continue;
        }

        let indent = indent_of(raw);
        if indent < target_indent {
            break;
        }
        if indent > target_indent || trimmed == PLACEHOLDER {
            trace!(line = *cursor, "skipping line");
            *cursor += 1;
            continue;
        }

        let node = parse_statement(lines, cursor, target_indent, trimmed);
        trace!(kind = node.kind(), "decompiled statement");
        nodes.push(node);
    }

    nodes
}

// ---------------------------------------------------------------------------
// Statement classification
// ---------------------------------------------------------------------------

/// Classify the statement at `cursor` and advance past everything it owns.
fn parse_statement(lines: &[&str], cursor: &mut usize, indent: usize, trimmed: &str) -> Node {
    if let Some(caps) = SECTION.captures(trimmed) {
        *cursor += 1;
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| unescape(m.as_str()))
            .unwrap_or_default();
        return Node::Section { name };
    }

    if let Some(value) = PROGRESS
        .captures(trimmed)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        *cursor += 1;
        return Node::Progress { value };
    }

    if let Some(caps) = GATHER.captures(trimmed) {
        *cursor += 1;
        return Node::Gather {
            list: caps[1].trim().to_string(),
        };
    }

    if let Some(caps) = IF_HEADER.captures(trimmed) {
        let cond = caps[1].to_string();
        if let Some(node) = parse_run_once(lines, cursor, indent, &cond) {
            return node;
        }
        return parse_if(lines, cursor, indent, cond);
    }

    if let Some(caps) = FOR_HEADER.captures(trimmed) {
        let item = caps[1].to_string();
        let iter = caps[2].to_string();
        *cursor += 1;
        let body = parse_block(lines, cursor, indent + STEP);
        return Node::For { item, iter, body };
    }

    if trimmed.starts_with(SNAPSHOT_OPEN) {
        skip_call(lines, cursor, indent);
        return Node::StoreSnapshot {
            args: SnapshotArgs::default(),
        };
    }

    *cursor += 1;
    Node::Ask {
        var: trimmed.to_string(),
    }
}

fn parse_if(lines: &[&str], cursor: &mut usize, indent: usize, cond: String) -> Node {
    *cursor += 1;
    let then = parse_block(lines, cursor, indent + STEP);

    let has_else = lines
        .get(*cursor)
        .is_some_and(|line| indent_of(line) == indent && line.trim() == "else:");
    let otherwise = if has_else {
        *cursor += 1;
        Some(parse_block(lines, cursor, indent + STEP))
    } else {
        None
    };

    Node::If {
        cond,
        then,
        otherwise,
    }
}

/// Read `if not defined(X) or not Y:` as a RUN_ONCE step guarded by `Y`.
///
/// The step's name is the first nested line that is neither a comment nor
/// an assignment to the flag; the rest of the nested block is dropped.
/// Returns `None` without moving the cursor when the guard shape does not
/// match or the nested block names nothing.
fn parse_run_once(lines: &[&str], cursor: &mut usize, indent: usize, cond: &str) -> Option<Node> {
    let caps = RUN_ONCE_GUARD.captures(cond)?;
    let flag = caps[1].to_string();

    let mut end = *cursor + 1;
    let mut name = None;
    while let Some(&raw) = lines.get(end) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            end += 1;
            continue;
        }
        if indent_of(raw) <= indent {
            break;
        }
        if name.is_none() && !trimmed.starts_with('#') && !assigns(trimmed, &flag) {
            name = Some(trimmed.to_string());
        }
        end += 1;
    }

    let name = name?;
    *cursor = end;
    Some(Node::RunOnce {
        name,
        flag: Some(flag),
    })
}

/// Advance past a (possibly multi-line) call, through the line where its
/// parentheses balance. Never consumes a line indented less than `indent`.
fn skip_call(lines: &[&str], cursor: &mut usize, indent: usize) {
    let mut depth = 0;
    let mut first = true;

    while let Some(&raw) = lines.get(*cursor) {
        if !first && !raw.trim().is_empty() && indent_of(raw) < indent {
            return;
        }
        first = false;
        depth += paren_delta(raw);
        *cursor += 1;
        if depth <= 0 {
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_skippable(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Whether `line` assigns to `flag` (`flag = ...`, not `flag == ...`).
fn assigns(line: &str, flag: &str) -> bool {
    line.strip_prefix(flag)
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with('=') && !rest.starts_with("=="))
}
