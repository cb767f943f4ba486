//! Contact form validation
//!
//! Checks the `{name, email, message}` payload submitted from the portfolio's
//! contact form. Validation only: nothing is delivered anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

const NAME_LEN: (usize, usize) = (2, 50);
const MESSAGE_LEN: (usize, usize) = (10, 1000);

/// Form field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Sender name
    Name,
    /// Reply address
    Email,
    /// Message body
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Message => write!(f, "message"),
        }
    }
}

/// One rejected field and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field
    pub field: Field,
    /// Human-readable reason
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Contact form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Sender name, 2 to 50 characters
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body, 10 to 1000 characters
    pub message: String,
}

impl ContactSubmission {
    /// Parse a submission from JSON
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Check every field, returning all problems found.
    ///
    /// Lengths are counted in characters after trimming surrounding
    /// whitespace. An empty result means the submission is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(message) = check_length(&self.name, NAME_LEN) {
            errors.push(FieldError {
                field: Field::Name,
                message,
            });
        }
        if let Some(message) = check_email(self.email.trim()) {
            errors.push(FieldError {
                field: Field::Email,
                message: message.to_string(),
            });
        }
        if let Some(message) = check_length(&self.message, MESSAGE_LEN) {
            errors.push(FieldError {
                field: Field::Message,
                message,
            });
        }

        errors
    }

    /// Whether [`Self::validate`] finds nothing wrong
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_length(value: &str, (min, max): (usize, usize)) -> Option<String> {
    let len = value.trim().chars().count();
    if len < min {
        Some(format!("must be at least {min} characters"))
    } else if len > max {
        Some(format!("must be at most {max} characters"))
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("is required");
    }
    if email.chars().any(char::is_whitespace) {
        return Some("must not contain whitespace");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Some("must contain '@'");
    };
    if domain.contains('@') {
        return Some("must contain exactly one '@'");
    }
    if local.is_empty() {
        return Some("is missing the part before '@'");
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Some("has an invalid domain");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<Field> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_submission() {
        let form = submission("Ada", "ada@example.com", "Hello, I liked your work.");
        assert!(form.validate().is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn test_name_length_bounds() {
        let message = "A long enough message.";
        assert_eq!(
            fields(&submission("A", "a@b.io", message).validate()),
            vec![Field::Name]
        );
        assert!(submission("Al", "a@b.io", message).is_valid());
        assert!(submission(&"n".repeat(50), "a@b.io", message).is_valid());

        let errors = submission(&"n".repeat(51), "a@b.io", message).validate();
        assert_eq!(errors[0].message, "must be at most 50 characters");
    }

    #[test]
    fn test_name_is_trimmed() {
        let form = submission("  A  ", "a@b.io", "A long enough message.");
        assert_eq!(fields(&form.validate()), vec![Field::Name]);
    }

    #[test]
    fn test_message_length_bounds() {
        assert_eq!(
            fields(&submission("Ada", "a@b.io", "too short").validate()),
            vec![Field::Message]
        );
        assert!(submission("Ada", "a@b.io", "ten chars!").is_valid());
        assert!(submission("Ada", "a@b.io", &"m".repeat(1000)).is_valid());
        assert!(!submission("Ada", "a@b.io", &"m".repeat(1001)).is_valid());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        assert!(submission("Zoë", "z@b.io", "éééééééééé").is_valid());
    }

    #[test]
    fn test_email_rules() {
        let message = "A long enough message.";
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "a@b@c.com",
            "a@localhost",
            "a@example..com",
            "a@.com",
            "a b@example.com",
        ] {
            let errors = submission("Ada", bad, message).validate();
            assert_eq!(fields(&errors), vec![Field::Email], "accepted '{bad}'");
        }
        for good in ["a@b.io", "first.last+tag@sub.example.org", " ada@example.com "] {
            assert!(submission("Ada", good, message).is_valid(), "rejected '{good}'");
        }
    }

    #[test]
    fn test_reports_all_errors() {
        let errors = submission("", "nope", "short").validate();
        assert_eq!(fields(&errors), vec![Field::Name, Field::Email, Field::Message]);
        assert_eq!(errors[1].to_string(), "email: must contain '@'");
    }

    #[test]
    fn test_from_json() {
        let form = ContactSubmission::from_json(
            r#"{"name": "Ada", "email": "ada@example.com", "message": "Hello there, friend."}"#,
        )
        .unwrap();
        assert_eq!(form.name, "Ada");
        assert!(form.is_valid());
    }

    #[test]
    fn test_from_json_missing_field() {
        let err = ContactSubmission::from_json(r#"{"name": "Ada"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
