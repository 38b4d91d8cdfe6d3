//! Raw email record as produced by the mail collaborator.

use serde::{Deserialize, Serialize};

/// One source message. Input-only; never mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmail {
    /// Unique message identifier.
    pub id: String,

    /// Subject line.
    #[serde(default)]
    pub subject: String,

    /// Sender address.
    #[serde(default)]
    pub sender: String,

    /// Date received, as formatted by the mail source (timezone preserved).
    #[serde(default)]
    pub date: String,

    /// Body content. May be truncated before classification.
    #[serde(default)]
    pub content: String,
}

impl RawEmail {
    /// Returns the body content trimmed to at most `max_chars` characters.
    pub fn trimmed_content(&self, max_chars: usize) -> String {
        self.content.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_content_short_body_unchanged() {
        let email = RawEmail {
            id: "m1".to_string(),
            subject: String::new(),
            sender: String::new(),
            date: String::new(),
            content: "short".to_string(),
        };
        assert_eq!(email.trimmed_content(1000), "short");
    }

    #[test]
    fn test_trimmed_content_truncates_by_chars() {
        let email = RawEmail {
            id: "m1".to_string(),
            subject: String::new(),
            sender: String::new(),
            date: String::new(),
            content: "äöü".repeat(500),
        };
        // Multi-byte characters count once each
        assert_eq!(email.trimmed_content(1000).chars().count(), 1000);
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let email: RawEmail = serde_json::from_str(r#"{"id": "m1"}"#).unwrap();
        assert_eq!(email.id, "m1");
        assert!(email.subject.is_empty());
        assert!(email.content.is_empty());
    }
}
