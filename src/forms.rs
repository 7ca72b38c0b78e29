//! Structured form validation results.
//!
//! Declarative rules live on the request DTOs via `validator` derives; this
//! module turns their output into a per-field error map and carries the
//! store-backed uniqueness checks that run at submission time.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::errors::ApiError;

pub const USERNAME_TAKEN: &str = "That username is taken. Please choose a different one.";
pub const EMAIL_TAKEN: &str = "That email is taken. Please choose a different one.";

/// Field name -> messages, ordered for stable rendering.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Empty set means the form passed; anything else aborts the handler
    /// before any store mutation.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(field.to_string(), message);
            }
        }
        out
    }
}

/// Run the declarative rules on a form, collecting every failure.
pub fn validate<T: Validate>(form: &T) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::RegisterForm;

    #[test]
    fn collects_every_failing_field() {
        let form = RegisterForm {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
        };

        let errors = validate(&form);
        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert!(errors.get("confirm_password").is_some());
    }

    #[test]
    fn valid_form_yields_no_errors() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        };

        assert!(validate(&form).is_empty());
        assert!(validate(&form).into_result().is_ok());
    }

    #[test]
    fn pushed_errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("username", USERNAME_TAKEN);
        errors.push("username", "second message");
        assert_eq!(errors.get("username").map(<[String]>::len), Some(2));
        assert!(errors.into_result().is_err());
    }
}
