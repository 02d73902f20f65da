//! Validation result types and field rules for feedback records.
//!
//! Every rule here is shared by the service layer and the HTTP boundary, so a
//! value accepted by one is accepted by the other.

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of `senderName` and `email`.
pub const SHORT_TEXT_MAX_CHARS: usize = 100;

/// Result of a validation operation
///
/// Collects every issue found instead of stopping at the first one, so a
/// caller can report all bad fields of a payload at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed (no errors)
    pub valid: bool,

    /// List of validation errors (block operation)
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Add an error to this validation result
    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue::error(path, message));
    }

    /// Render all errors as a single `path: message; ...` line.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Individual validation issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Wire name of the field that failed validation, e.g. `senderName`
    pub path: String,

    /// Human-readable description of the validation issue
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Check a required free-text field: present and non-empty after trimming.
pub fn check_required_text(result: &mut ValidationResult, path: &str, value: Option<&str>) {
    match value {
        None => result.add_error(path, "is required"),
        Some(v) if v.trim().is_empty() => result.add_error(path, "must not be empty"),
        Some(_) => {}
    }
}

/// Check a required short-text field: required text that also fits in
/// [`SHORT_TEXT_MAX_CHARS`] characters.
pub fn check_short_text(result: &mut ValidationResult, path: &str, value: Option<&str>) {
    check_required_text(result, path, value);
    if let Some(v) = value {
        if v.chars().count() > SHORT_TEXT_MAX_CHARS {
            result.add_error(
                path,
                format!("must be at most {} characters", SHORT_TEXT_MAX_CHARS),
            );
        }
    }
}
