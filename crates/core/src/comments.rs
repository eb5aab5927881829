//! Comment-thread rules: attachment resolution and content validation.
//!
//! A comment attaches to exactly one of {production item, sample item,
//! request}, or to a parent comment (a reply). The four optional foreign
//! keys of the wire format collapse into the [`CommentTarget`] tagged union
//! so "which ones are set" is settled at the type level.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of comment content in characters.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Default depth replies are eagerly nested to on reads.
pub const DEFAULT_REPLY_DEPTH: i64 = 3;

/// Upper bound for the caller-supplied reply depth.
pub const MAX_REPLY_DEPTH: i64 = 10;

/// What a comment is attached to.
///
/// A `Reply` inherits the entity attachment of its parent at creation
/// time; the caller never supplies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    ProductionItem(DbId),
    SampleItem(DbId),
    Request(DbId),
    Reply(DbId),
}

impl CommentTarget {
    /// Resolve the four optional attachment fields into exactly one target.
    pub fn resolve(
        production_item_id: Option<DbId>,
        sample_item_id: Option<DbId>,
        request_id: Option<DbId>,
        parent_comment_id: Option<DbId>,
    ) -> Result<Self, CoreError> {
        let mut targets = Vec::with_capacity(1);
        if let Some(id) = production_item_id {
            targets.push(CommentTarget::ProductionItem(id));
        }
        if let Some(id) = sample_item_id {
            targets.push(CommentTarget::SampleItem(id));
        }
        if let Some(id) = request_id {
            targets.push(CommentTarget::Request(id));
        }
        if let Some(id) = parent_comment_id {
            targets.push(CommentTarget::Reply(id));
        }

        match targets.len() {
            1 => Ok(targets.remove(0)),
            0 => Err(CoreError::Validation(
                "Comment must attach to exactly one of production_item_id, \
                 sample_item_id, request_id, or parent_comment_id"
                    .to_string(),
            )),
            n => Err(CoreError::Validation(format!(
                "Comment attachment is ambiguous: {n} attachment fields were \
                 supplied, expected exactly one"
            ))),
        }
    }
}

/// Validate comment content: non-empty after trimming, within length cap.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Clamp a caller-supplied reply depth to `1..=MAX_REPLY_DEPTH`.
pub fn clamp_reply_depth(depth: Option<i64>) -> i64 {
    depth
        .unwrap_or(DEFAULT_REPLY_DEPTH)
        .clamp(1, MAX_REPLY_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_attachment_resolves() {
        assert_eq!(
            CommentTarget::resolve(Some(7), None, None, None).unwrap(),
            CommentTarget::ProductionItem(7)
        );
        assert_eq!(
            CommentTarget::resolve(None, None, None, Some(3)).unwrap(),
            CommentTarget::Reply(3)
        );
    }

    #[test]
    fn zero_attachments_is_rejected() {
        let err = CommentTarget::resolve(None, None, None, None).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn multiple_attachments_are_rejected() {
        let err = CommentTarget::resolve(Some(1), Some(2), None, None).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
        assert!(CommentTarget::resolve(Some(1), None, None, Some(9)).is_err());
    }

    #[test]
    fn empty_and_oversized_content_rejected() {
        assert!(validate_content("   ").is_err());
        assert!(validate_content(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
        assert!(validate_content("looks good").is_ok());
    }

    #[test]
    fn depth_clamps_to_bounds() {
        assert_eq!(clamp_reply_depth(None), DEFAULT_REPLY_DEPTH);
        assert_eq!(clamp_reply_depth(Some(0)), 1);
        assert_eq!(clamp_reply_depth(Some(99)), MAX_REPLY_DEPTH);
        assert_eq!(clamp_reply_depth(Some(2)), 2);
    }
}
