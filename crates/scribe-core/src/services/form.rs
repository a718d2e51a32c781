//! Post form validation.
//!
//! Validation is explicit: `validate` turns raw input into either a
//! normalized value or a set of field errors. Field errors are reported
//! data for the caller to re-show the form with; they never escape as
//! an error of the call itself.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RepoError;
use crate::ports::GroupRepository;

/// Raw form submission: both fields as the client sent them.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub text: Option<String>,
    pub group: Option<String>,
}

/// Normalized form output: trimmed text and a resolved group id, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub text: String,
    pub group_id: Option<Uuid>,
}

/// Per-field error messages, keyed by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }
}

/// Validation outcome: a valid post or the errors to re-show the form with.
#[derive(Debug, Clone)]
pub enum Validated {
    Valid(ValidatedPost),
    Invalid(FieldErrors),
}

/// Validator for the post form.
pub struct PostForm {
    groups: Arc<dyn GroupRepository>,
}

impl PostForm {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    /// Validate and normalize a submission.
    ///
    /// `text` must be non-empty after trimming. `group` may be absent or
    /// an empty string (a post need not belong to a group); otherwise it
    /// must be the id of an existing group. The outer `Result` carries
    /// store failures only.
    pub async fn validate(&self, input: &PostInput) -> Result<Validated, RepoError> {
        let mut errors = FieldErrors::default();

        let text = input.text.as_deref().unwrap_or("").trim().to_string();
        if text.is_empty() {
            errors.add("text", "This field is required.");
        }

        let group_id = match input.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => {
                    if self.groups.find_by_id(id).await?.is_some() {
                        Some(id)
                    } else {
                        errors.add("group", "Select a valid group.");
                        None
                    }
                }
                Err(_) => {
                    errors.add("group", "Select a valid group.");
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(Validated::Valid(ValidatedPost { text, group_id }))
        } else {
            Ok(Validated::Invalid(errors))
        }
    }
}
