//! Field validation toolkit.
//!
//! Typed constraint evaluation in place of stringly-typed rule lists: each
//! entity module drives a [`Checker`] over its draft input and either gets the
//! sanitized values back or a [`FieldErrors`] report. Validation never has
//! side effects; services run it before touching storage or persistence.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Per-field error report: `field -> messages`, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, mut messages) in other.0 {
            self.0.entry(field).or_default().append(&mut messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

/// Constraint evaluator for one draft.
///
/// Each rule method returns the sanitized value when the constraint holds and
/// `None` otherwise, recording a message either way the check fails. Callers
/// finish with [`Checker::finish`], which rejects when anything was recorded.
#[derive(Debug, Default)]
pub struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure computed outside the built-in rules (uniqueness,
    /// foreign-key existence, upload checks).
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(field, message);
    }

    /// Required string, at most `max` characters.
    pub fn required_str(&mut self, field: &'static str, value: &str, max: usize) -> Option<String> {
        if value.trim().is_empty() {
            self.errors.push(field, "is required");
            return None;
        }
        if value.chars().count() > max {
            self.errors
                .push(field, format!("must be {max} characters or fewer"));
            return None;
        }
        Some(value.to_owned())
    }

    /// Optional string, at most `max` characters when present.
    ///
    /// Absent and present-but-invalid both come back as `None`; the recorded
    /// errors distinguish them at [`Checker::finish`] time.
    pub fn optional_str(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
    ) -> Option<String> {
        let value = value?;
        if value.chars().count() > max {
            self.errors
                .push(field, format!("must be {max} characters or fewer"));
            return None;
        }
        Some(value.to_owned())
    }

    /// Required decimal in the closed range `[min, max]`.
    pub fn required_decimal(
        &mut self,
        field: &'static str,
        value: Option<Decimal>,
        min: Decimal,
        max: Decimal,
    ) -> Option<Decimal> {
        let Some(value) = value else {
            self.errors.push(field, "is required");
            return None;
        };
        if value < min || value > max {
            self.errors
                .push(field, format!("must be between {min} and {max}"));
            return None;
        }
        Some(value)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// Accept `value` when no constraint failed, otherwise reject with the
    /// collected report.
    pub fn finish<T>(self, value: T) -> DomainResult<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_str_rejects_empty_and_overlong() {
        let mut check = Checker::new();
        assert_eq!(check.required_str("title", "", 255), None);
        assert_eq!(check.required_str("name", &"x".repeat(256), 255), None);
        let errors = check.into_errors();
        assert_eq!(errors.get("title").unwrap(), ["is required"]);
        assert_eq!(errors.get("name").unwrap(), ["must be 255 characters or fewer"]);
    }

    #[test]
    fn optional_str_passes_absent_value() {
        let mut check = Checker::new();
        assert_eq!(check.optional_str("description", None, 10), None);
        assert!(!check.has_errors());
    }

    #[test]
    fn required_decimal_enforces_closed_range() {
        let mut check = Checker::new();
        let max = Decimal::new(99_999_999, 2);
        assert_eq!(
            check.required_decimal("price", Some(max), Decimal::ZERO, max),
            Some(max)
        );
        assert_eq!(
            check.required_decimal("price", Some(Decimal::NEGATIVE_ONE), Decimal::ZERO, max),
            None
        );
        assert_eq!(check.required_decimal("price", None, Decimal::ZERO, max), None);
        assert_eq!(check.into_errors().get("price").unwrap().len(), 2);
    }

    #[test]
    fn finish_rejects_when_anything_was_recorded() {
        let mut check = Checker::new();
        check.reject("name", "has already been taken");
        let err = check.finish(()).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("name").unwrap(), ["has already been taken"]);
    }

    #[test]
    fn merge_appends_messages_per_field() {
        let mut a = FieldErrors::new();
        a.push("title", "is required");
        let mut b = FieldErrors::new();
        b.push("title", "must be 255 characters or fewer");
        b.push("price", "is required");
        a.merge(b);
        assert_eq!(a.get("title").unwrap().len(), 2);
        assert_eq!(a.get("price").unwrap().len(), 1);

        let fields: Vec<&str> = a.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["price", "title"]);
    }
}
