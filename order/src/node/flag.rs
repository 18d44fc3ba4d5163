/// Prefix of every derived run-once flag.
const FLAG_PREFIX: &str = "run_once_";

/// Derive the guard flag for a RUN_ONCE step from its name alone.
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters collapses to a single `_`. The result is always a valid
/// identifier, so it can be emitted unquoted in the guard condition.
pub fn derive_flag(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("step");
    }

    format!("{FLAG_PREFIX}{slug}")
}
