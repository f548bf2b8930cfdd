//! Answer normalization and matching.
//!
//! The matcher is the single authority for auto-grading option-based
//! questions and for highlighting the accepted option in a rendered
//! question. It is deliberately lenient about trailing punctuation and
//! nothing else; case and interior punctuation must match exactly, and
//! there is no partial credit.

/// Trims surrounding whitespace, then strips at most one trailing `.` or `,`.
fn normalize(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(['.', ',']).unwrap_or(trimmed)
}

/// Decides whether a candidate answer is the canonical answer.
///
/// An absent candidate never matches. Exact codepoint equality matches
/// immediately; otherwise both sides are compared in normalized form.
#[must_use]
pub fn answer_matches(candidate: Option<&str>, canonical: &str) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };
    if candidate == canonical {
        return true;
    }
    normalize(candidate) == normalize(canonical)
}
