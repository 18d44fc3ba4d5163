use std::ops::Range;

/// One `---`-delimited block of an interview document.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Zero-based index among the non-empty segments.
    pub position: usize,
    /// Segment text with surrounding whitespace trimmed.
    pub text: String,
    /// Byte span of `text` within the document.
    pub span: Range<usize>,
}

/// Split a document on separator lines (`---` once trimmed). Segments that
/// are empty after trimming are dropped.
pub fn split_blocks(document: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in document.split_inclusive('\n') {
        if line.trim() == "---" {
            push_segment(document, start..offset, &mut segments);
            start = offset + line.len();
        }
        offset += line.len();
    }
    push_segment(document, start..document.len(), &mut segments);

    segments
}

fn push_segment(document: &str, range: Range<usize>, segments: &mut Vec<Segment>) {
    let raw = &document[range.clone()];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let begin = range.start + lead;
    segments.push(Segment {
        position: segments.len(),
        text: text.to_string(),
        span: begin..begin + text.len(),
    });
}
