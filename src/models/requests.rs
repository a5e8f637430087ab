//! Request DTOs for the notes server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{NoteError, Result};

/// Request body for the update operation (PUT /note/:id)
///
/// `content` is kept as raw JSON so that a non-string value can be reported
/// as a validation error naming the field, rather than a generic body
/// rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    /// The new note content; must be a JSON string
    #[serde(default)]
    pub content: Option<Value>,
}

impl UpdateNoteRequest {
    /// Creates a request carrying the given text content
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(Value::String(content.into())),
        }
    }

    /// Validates the request and extracts the content text.
    pub fn into_content(self) -> Result<String> {
        match self.content {
            Some(Value::String(content)) => Ok(content),
            _ => Err(NoteError::Validation(
                "Content must be a string".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"content": "hello"}"#;
        let req: UpdateNoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.into_content().unwrap(), "hello");
    }

    #[test]
    fn test_update_request_empty_string_is_valid() {
        let req: UpdateNoteRequest = serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert_eq!(req.into_content().unwrap(), "");
    }

    #[test]
    fn test_update_request_non_string_content() {
        for body in [
            r#"{"content": 42}"#,
            r#"{"content": null}"#,
            r#"{"content": ["a"]}"#,
            r#"{"content": {"text": "a"}}"#,
            r#"{"content": true}"#,
        ] {
            let req: UpdateNoteRequest = serde_json::from_str(body).unwrap();
            assert!(
                matches!(req.into_content(), Err(NoteError::Validation(_))),
                "{} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_update_request_missing_content() {
        let req: UpdateNoteRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(req.into_content(), Err(NoteError::Validation(_))));
    }

    #[test]
    fn test_update_request_with_content() {
        let req = UpdateNoteRequest::with_content("hi");
        assert_eq!(req.into_content().unwrap(), "hi");
    }
}
