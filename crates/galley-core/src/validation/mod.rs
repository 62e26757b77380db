//! Submission field validation
//!
//! Field bounds live on [`SubmissionPayload`](crate::models::SubmissionPayload)
//! via the `Validate` derive; this module maps `validator` output to the
//! field-keyed error messages surfaced to submitters.

use std::collections::BTreeMap;

use validator::ValidationErrors;

pub const TITLE_MIN_CHARS: u64 = 3;
pub const TITLE_MAX_CHARS: u64 = 200;
pub const ABSTRACT_MIN_CHARS: u64 = 50;
pub const ABSTRACT_MAX_CHARS: u64 = 2000;

/// User-facing error key for a payload field.
///
/// Struct field names are an implementation detail; the submission form keys
/// its error map by the names the UI knows.
pub fn error_key(field: &str) -> &str {
    match field {
        "abstract_text" => "abstract",
        "corresponding_email" => "email",
        other => other,
    }
}

fn message_for(field: &str, code: &str) -> String {
    match (field, code) {
        ("title", "length") => format!(
            "Title must be between {} and {} characters",
            TITLE_MIN_CHARS, TITLE_MAX_CHARS
        ),
        ("abstract_text", "length") => format!(
            "Abstract must be between {} and {} characters",
            ABSTRACT_MIN_CHARS, ABSTRACT_MAX_CHARS
        ),
        ("authors", "length") => "At least one author is required".to_string(),
        ("tags", "length") => "At least one tag is required".to_string(),
        ("corresponding_email", "email") => "Invalid email address".to_string(),
        (field, code) => format!("Invalid {} ({})", field, code),
    }
}

/// Flatten `validator` errors into a field-keyed message map. One message per
/// field; the first failing rule wins.
pub fn collect_field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        if let Some(err) = field_errors.first() {
            map.entry(error_key(field.as_ref()).to_string())
                .or_insert_with(|| message_for(field.as_ref(), err.code.as_ref()));
        }
    }
    map
}
