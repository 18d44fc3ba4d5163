use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Substrings of a block id that mark it as the order block.
pub const ORDER_ID_MARKERS: [&str; 1] = ["interview_order"];

/// "interview order" framed on both sides by runs of decorative symbols.
static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[#=*\-]{3,}\s*interview[\s_-]+order\s*[#=*\-]{3,}").expect("banner pattern")
});

static LABEL_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)interview\s+order").expect("label pattern"));

/// Decide whether a raw block is the interview order block.
///
/// Checks, in order: an order marker in `id`, a banner comment in the block
/// text, then the display label (banner or plain phrase).
pub fn looks_like_order(block_text: &str, id: &str, label: Option<&str>) -> bool {
    let id_lower = id.to_ascii_lowercase();
    if ORDER_ID_MARKERS.iter().any(|m| id_lower.contains(m)) {
        debug!(id, "order block recognized by id");
        return true;
    }

    if BANNER.is_match(block_text) {
        debug!(id, "order block recognized by banner");
        return true;
    }

    if let Some(label) = label {
        if BANNER.is_match(label) || LABEL_PHRASE.is_match(label) {
            debug!(id, label, "order block recognized by label");
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::looks_like_order;

    #[test]
    fn id_marker_is_case_insensitive() {
        assert!(looks_like_order("", "Interview_Order_1", None));
        assert!(!looks_like_order("", "block_3", None));
    }

    #[test]
    fn banner_needs_framing() {
        assert!(looks_like_order("==== Interview Order ====", "x", None));
        assert!(!looks_like_order("# interview order", "x", None));
    }

    #[test]
    fn label_phrase() {
        assert!(looks_like_order("code: |\n  a", "x", Some("Main interview order")));
        assert!(!looks_like_order("code: |\n  a", "x", Some("Intake questions")));
    }
}
