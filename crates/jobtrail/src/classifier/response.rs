//! Structured classification results and reply parsing.

use serde::{Deserialize, Serialize};

use super::error::{ClassifierError, Result};

/// Maximum length of the reply preview included in parse errors.
const MAX_PREVIEW_LENGTH: usize = 200;

/// The service's structured guess for one email.
///
/// Every field is tolerant of being absent: the service is not trusted to
/// produce complete output, and defaulting happens again downstream when a
/// result is formatted into a ledger record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Echoes the raw email's identifier.
    #[serde(default)]
    pub message_id: String,

    /// Whether this email concerns a job application.
    #[serde(default)]
    pub is_job_related: bool,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub job_title: Option<String>,

    /// Free-form status such as "Applied" or "Interview Scheduled".
    #[serde(default)]
    pub application_status: Option<String>,

    /// Confidence score in [0.0, 1.0]. Defaults to 0.0 when omitted.
    #[serde(default)]
    pub confidence_score: f64,

    /// Free-text summary of the email's relevant details.
    #[serde(default)]
    pub key_details: String,

    /// Free-text recommendation for the user's next step.
    #[serde(default)]
    pub next_action: String,
}

/// Parses the raw service reply into classification results.
///
/// The reply may wrap its JSON payload in prose or code fences, and may be
/// a single object where an array was requested. A single object is
/// normalized into a one-element collection.
pub fn parse_results(reply: &str) -> Result<Vec<ClassificationResult>> {
    let json_str = extract_json(reply);

    let value: serde_json::Value =
        serde_json::from_str(&json_str).map_err(|e| ClassifierError::ResponseParse {
            reason: e.to_string(),
            preview: preview(reply),
        })?;

    let results = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<ClassificationResult>, _>>(),
        obj @ serde_json::Value::Object(_) => {
            serde_json::from_value(obj).map(|single| vec![single])
        }
        other => {
            return Err(ClassifierError::ResponseParse {
                reason: format!("expected array or object, got {}", value_kind(&other)),
                preview: preview(reply),
            })
        }
    };

    results.map_err(|e| ClassifierError::ResponseParse {
        reason: e.to_string(),
        preview: preview(reply),
    })
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Truncates a reply for inclusion in error messages, keeping enough
/// context to diagnose the failure without flooding the logs.
fn preview(reply: &str) -> String {
    if reply.chars().count() > MAX_PREVIEW_LENGTH {
        let truncated: String = reply.chars().take(MAX_PREVIEW_LENGTH).collect();
        format!("{}... (truncated)", truncated)
    } else {
        reply.to_string()
    }
}

/// Extracts the JSON payload from a reply that may contain extra text.
/// Uses a stateful scanner that tracks string boundaries and escape
/// sequences so braces inside string values don't confuse the depth count.
fn extract_json(reply: &str) -> String {
    // The payload starts at the first '[' or '{'
    let start = match reply.find(|c| c == '[' || c == '{') {
        Some(idx) => idx,
        None => return reply.to_string(),
    };

    let open = reply[start..].chars().next().unwrap_or('{');
    let close = if open == '[' { ']' } else { '}' };

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;
    let mut end = reply.len();

    for (i, c) in reply[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
            }
            c if c == open && !in_string => {
                depth += 1;
            }
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    end = start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    reply[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_reply() {
        let reply = r#"[
            {"message_id": "m1", "is_job_related": true, "company_name": "Acme",
             "job_title": "Engineer", "confidence_score": 0.9},
            {"message_id": "m2", "is_job_related": false}
        ]"#;

        let results = parse_results(reply).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].company_name.as_deref(), Some("Acme"));
        assert!(!results[1].is_job_related);
    }

    #[test]
    fn test_single_object_normalized_to_one_element() {
        let reply = r#"{"message_id": "m1", "is_job_related": true}"#;

        let results = parse_results(reply).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message_id, "m1");
    }

    #[test]
    fn test_payload_extracted_from_surrounding_prose() {
        let reply = "Here are the results:\n```json\n[{\"message_id\": \"m1\"}]\n```\nDone.";

        let results = parse_results(reply).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message_id, "m1");
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_extraction() {
        let reply = r#"[{"message_id": "m1", "key_details": "uses {braces} and ]brackets["}]"#;

        let results = parse_results(reply).unwrap();
        assert_eq!(results[0].key_details, "uses {braces} and ]brackets[");
    }

    #[test]
    fn test_missing_fields_default() {
        let results = parse_results(r#"[{"message_id": "m1"}]"#).unwrap();
        let r = &results[0];
        assert!(!r.is_job_related);
        assert!(r.company_name.is_none());
        assert_eq!(r.confidence_score, 0.0);
        assert!(r.next_action.is_empty());
    }

    #[test]
    fn test_unparseable_reply_includes_preview() {
        let reply = "I could not process these emails, sorry.";
        let err = parse_results(reply).unwrap_err();
        match err {
            ClassifierError::ResponseParse { preview, .. } => {
                assert!(preview.contains("could not process"));
            }
            other => panic!("Expected ResponseParse, got {:?}", other),
        }
    }

    #[test]
    fn test_long_preview_is_truncated() {
        let reply = "x".repeat(500);
        let err = parse_results(&reply).unwrap_err();
        match err {
            ClassifierError::ResponseParse { preview, .. } => {
                assert!(preview.ends_with("(truncated)"));
                assert!(preview.len() < 250);
            }
            other => panic!("Expected ResponseParse, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_reply_rejected() {
        let err = parse_results("42").unwrap_err();
        assert!(matches!(err, ClassifierError::ResponseParse { .. }));
    }
}
