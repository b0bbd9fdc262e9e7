//! Reconstruction of entity spans from per-fragment tags.
//!
//! The model tags sub-word fragments, not words; this module walks the
//! fragment and tag sequences together and merges contiguous runs back into
//! readable entity strings.

/// WordPiece marker on fragments that attach to the previous fragment
/// without a space.
pub(crate) const SUBWORD_MARKER: &str = "##";

/// A reconstructed entity: accumulated surface text plus the tag of the last
/// fragment in its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub tag: String,
}

/// Whether `current` extends the span that ended with `previous`.
///
/// An `I-` tag continues a run of the same class, whether the run was opened
/// by `B-` or `I-`. A fresh `B-` always opens a new span, so two adjacent
/// same-class `B-` tags yield two spans.
pub(crate) fn continues_span(previous: &str, current: &str) -> bool {
    match current.strip_prefix("I-") {
        Some(class) => {
            let previous_class = previous
                .strip_prefix("B-")
                .or_else(|| previous.strip_prefix("I-"));
            previous_class == Some(class)
        }
        None => false,
    }
}

/// Merge parallel fragment/tag sequences into entity spans.
///
/// Walks both sequences position by position (stopping at the shorter one).
/// `O` positions emit nothing; continuation fragments are appended to the
/// most recent span, with the sub-word marker stripped and no separator when
/// present, or with a single space otherwise. Any other non-`O` tag opens a
/// new span holding the fragment text as-is. The previous tag is updated at
/// every position, so an `O` between two runs always splits them.
pub fn merge_fragments(fragments: &[String], tags: &[String]) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = Vec::new();
    let mut previous = "O".to_string();

    for (fragment, tag) in fragments.iter().zip(tags.iter()) {
        if tag != "O" {
            match spans.last_mut() {
                Some(span) if continues_span(&previous, tag) => {
                    if let Some(rest) = fragment.strip_prefix(SUBWORD_MARKER) {
                        span.text.push_str(rest);
                    } else {
                        span.text.push(' ');
                        span.text.push_str(fragment);
                    }
                    span.tag = tag.clone();
                }
                _ => spans.push(EntitySpan {
                    text: fragment.clone(),
                    tag: tag.clone(),
                }),
            }
        }
        previous = tag.clone();
    }

    spans
}
