use chrono::DateTime;
use serde::Deserialize;
use std::fmt;

/// Maximum message text length in Unicode code points.
pub const MAX_TEXT_LENGTH: usize = 4096;

/// Raw webhook payload as parsed from JSON.
///
/// Every field is optional at this stage so that validation can report all
/// missing or malformed fields in one pass instead of failing on the first
/// serde error. Unknown extra fields are ignored, not rejected.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A fully validated message, ready for storage.
#[derive(Debug, Clone)]
pub struct Message {
    pub message_id: String,
    pub from: String,
    pub to: String,
    pub ts: String,
    pub text: Option<String>,
}

/// A single violated constraint, naming the offending field.
#[derive(Debug, Clone)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validation failure enumerating every violated constraint, in the fixed
/// order the rules are checked: message_id, from, to, ts, text.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Failure for a body that did not parse as JSON at all.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new("body", reason)],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.reason)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// E.164-like sender/recipient address: `+` followed by one or more digits.
fn is_msisdn(value: &str) -> bool {
    match value.strip_prefix('+') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

impl IncomingMessage {
    /// Applies the validation rules in fixed order and either produces a
    /// [`Message`] or a [`ValidationError`] listing all violated fields.
    pub fn validate(self) -> Result<Message, ValidationError> {
        let mut violations = Vec::new();

        let message_id = match self.message_id {
            Some(id) if !id.is_empty() => Some(id),
            _ => {
                violations.push(FieldViolation::new(
                    "message_id",
                    "must be present and non-empty",
                ));
                None
            }
        };

        let from = match self.from {
            Some(v) if is_msisdn(&v) => Some(v),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "from",
                    "must match +<digits> (E.164 format)",
                ));
                None
            }
            None => {
                violations.push(FieldViolation::new("from", "is required"));
                None
            }
        };

        let to = match self.to {
            Some(v) if is_msisdn(&v) => Some(v),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "to",
                    "must match +<digits> (E.164 format)",
                ));
                None
            }
            None => {
                violations.push(FieldViolation::new("to", "is required"));
                None
            }
        };

        let ts = match self.ts {
            Some(v) if !v.ends_with('Z') => {
                violations.push(FieldViolation::new(
                    "ts",
                    "must be an ISO-8601 UTC timestamp ending in Z",
                ));
                None
            }
            // Z-suffixed but semantically invalid dates (month 13, day 32)
            // are rejected here, not at storage time.
            Some(v) => match DateTime::parse_from_rfc3339(&v) {
                Ok(_) => Some(v),
                Err(_) => {
                    violations.push(FieldViolation::new(
                        "ts",
                        "is not a valid ISO-8601 date-time",
                    ));
                    None
                }
            },
            None => {
                violations.push(FieldViolation::new("ts", "is required"));
                None
            }
        };

        let text = match self.text {
            Some(t) if t.chars().count() > MAX_TEXT_LENGTH => {
                violations.push(FieldViolation::new(
                    "text",
                    format!("must be at most {} characters", MAX_TEXT_LENGTH),
                ));
                None
            }
            t => t,
        };

        match (message_id, from, to, ts) {
            (Some(message_id), Some(from), Some(to), Some(ts)) if violations.is_empty() => {
                Ok(Message {
                    message_id,
                    from,
                    to,
                    ts,
                    text,
                })
            }
            _ => Err(ValidationError { violations }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(json: &str) -> IncomingMessage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_valid_message() {
        let msg = incoming(
            r#"{"message_id":"m1","from":"+919876543210","to":"+14155550100",
                "ts":"2025-01-15T10:00:00Z","text":"Hello"}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(msg.message_id, "m1");
        assert_eq!(msg.from, "+919876543210");
        assert_eq!(msg.text.as_deref(), Some("Hello"));
    }

    #[test]
    fn accepts_absent_text() {
        let msg =
            incoming(r#"{"message_id":"m1","from":"+1","to":"+2","ts":"2025-01-15T10:00:00Z"}"#)
                .validate()
                .unwrap();
        assert!(msg.text.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let result = incoming(
            r#"{"message_id":"m1","from":"+1","to":"+2",
                "ts":"2025-01-15T10:00:00Z","channel":"whatsapp"}"#,
        )
        .validate();
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_missing_message_id() {
        let err = incoming(r#"{"from":"+1","to":"+2","ts":"2025-01-15T10:00:00Z"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "message_id");
    }

    #[test]
    fn rejects_empty_message_id() {
        let err =
            incoming(r#"{"message_id":"","from":"+1","to":"+2","ts":"2025-01-15T10:00:00Z"}"#)
                .validate()
                .unwrap_err();
        assert_eq!(err.violations[0].field, "message_id");
    }

    #[test]
    fn rejects_from_without_plus() {
        let err = incoming(
            r#"{"message_id":"m1","from":"919876543210","to":"+2","ts":"2025-01-15T10:00:00Z"}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(err.violations[0].field, "from");
    }

    #[test]
    fn rejects_plus_with_no_digits() {
        let err =
            incoming(r#"{"message_id":"m1","from":"+","to":"+2","ts":"2025-01-15T10:00:00Z"}"#)
                .validate()
                .unwrap_err();
        assert_eq!(err.violations[0].field, "from");
    }

    #[test]
    fn rejects_non_digit_address() {
        let err =
            incoming(r#"{"message_id":"m1","from":"+91abc","to":"+2","ts":"2025-01-15T10:00:00Z"}"#)
                .validate()
                .unwrap_err();
        assert_eq!(err.violations[0].field, "from");
    }

    #[test]
    fn rejects_timestamp_without_z() {
        let err =
            incoming(r#"{"message_id":"m1","from":"+1","to":"+2","ts":"2025-01-15 10:00:00"}"#)
                .validate()
                .unwrap_err();
        assert_eq!(err.violations[0].field, "ts");
    }

    #[test]
    fn rejects_semantically_invalid_date() {
        // Z-suffixed but month 13 does not exist.
        let err =
            incoming(r#"{"message_id":"m1","from":"+1","to":"+2","ts":"2025-13-15T10:00:00Z"}"#)
                .validate()
                .unwrap_err();
        assert_eq!(err.violations[0].field, "ts");
    }

    #[test]
    fn rejects_text_over_limit() {
        let long = "x".repeat(5000);
        let err = incoming(&format!(
            r#"{{"message_id":"m1","from":"+1","to":"+2","ts":"2025-01-15T10:00:00Z","text":"{}"}}"#,
            long
        ))
        .validate()
        .unwrap_err();
        assert_eq!(err.violations[0].field, "text");
    }

    #[test]
    fn text_limit_counts_code_points() {
        // 4096 two-byte characters are exactly at the limit.
        let text = "\u{00e9}".repeat(MAX_TEXT_LENGTH);
        let result = incoming(&format!(
            r#"{{"message_id":"m1","from":"+1","to":"+2","ts":"2025-01-15T10:00:00Z","text":"{}"}}"#,
            text
        ))
        .validate();
        assert!(result.is_ok());
    }

    #[test]
    fn reports_all_violations_in_rule_order() {
        let err = incoming(r#"{"from":"nope","ts":"2025-01-15 10:00:00"}"#)
            .validate()
            .unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["message_id", "from", "to", "ts"]);
    }

    #[test]
    fn display_names_offending_fields() {
        let err = incoming(
            r#"{"message_id":"m1","from":"bad","to":"+2","ts":"2025-01-15T10:00:00Z"}"#,
        )
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("from"));
    }
}
