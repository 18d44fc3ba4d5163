use std::sync::LazyLock;

use regex::Regex;

pub(super) static SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^nav\.set_section\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')\s*\)$"#)
        .expect("section pattern")
});

pub(super) static PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^set_progress\(\s*(-?\d+(?:\.\d+)?)\s*\)$").expect("progress pattern")
});

pub(super) static GATHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\.gather\(\s*\)$").expect("gather pattern"));

pub(super) static IF_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^if\s+(.+?)\s*:$").expect("if pattern"));

pub(super) static FOR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^for\s+(.+?)\s+in\s+(.+?)\s*:$").expect("for pattern"));

/// `not defined(X) or not Y`, the only guard shape read as RUN_ONCE.
pub(super) static RUN_ONCE_GUARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^not\s+defined\(\s*(?:"[^"]*"|'[^']*'|[^)]*)\s*\)\s+or\s+not\s+(.+?)\s*$"#)
        .expect("run-once guard pattern")
});

pub(super) const SNAPSHOT_OPEN: &str = "store_variables_snapshot(";

/// Undo the escaping applied when a section name was quoted.
pub(super) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Net parenthesis depth change of a line, ignoring quoted text.
pub(super) fn paren_delta(line: &str) -> i32 {
    let mut depth = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' => depth += 1,
            ')' => depth -= 1,
            '#' => break,
            _ => {}
        }
    }

    depth
}
