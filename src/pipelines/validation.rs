//! Minimum-length guard applied before any model invocation.
//!
//! Summarization and token classification degrade unpredictably on degenerate
//! inputs, so requests whose encoded form is shorter than
//! [`MIN_INPUT_TOKENS`] are rejected up front with a fixed message. The
//! zero-shot categorization pipeline intentionally skips this gate.

use crate::{PipelineError, Result};

/// Inputs encoding to fewer tokens than this are rejected.
pub const MIN_INPUT_TOKENS: usize = 10;

/// Fail with the fixed `"text too short"` validation error when the encoded
/// sequence is below [`MIN_INPUT_TOKENS`].
pub fn ensure_min_tokens(ids: &[u32]) -> Result<()> {
    if ids.len() < MIN_INPUT_TOKENS {
        return Err(PipelineError::text_too_short());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_below_threshold() {
        let ids = vec![1u32; MIN_INPUT_TOKENS - 1];
        let err = ensure_min_tokens(&ids).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "text too short");
    }

    #[test]
    fn accepts_at_threshold() {
        let ids = vec![1u32; MIN_INPUT_TOKENS];
        assert!(ensure_min_tokens(&ids).is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(ensure_min_tokens(&[]).is_err());
    }
}
