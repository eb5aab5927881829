//! Sample item field validation.

use crate::error::CoreError;

/// Maximum length for the revision label (e.g. "A", "B2").
pub const MAX_REVISION_LENGTH: usize = 16;

/// Maximum length for free-text notes fields.
pub const MAX_NOTES_LENGTH: usize = 10_000;

/// Validate a revision label: non-empty after trimming, within length cap.
pub fn validate_revision(revision: &str) -> Result<(), CoreError> {
    if revision.trim().is_empty() {
        return Err(CoreError::Validation(
            "Revision must not be empty".to_string(),
        ));
    }
    if revision.chars().count() > MAX_REVISION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Revision exceeds maximum length of {MAX_REVISION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional notes field against the length cap.
pub fn validate_notes(notes: Option<&str>) -> Result<(), CoreError> {
    if let Some(notes) = notes {
        if notes.chars().count() > MAX_NOTES_LENGTH {
            return Err(CoreError::Validation(format!(
                "Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
            )));
        }
    }
    Ok(())
}
