//! The `FormSchema` aggregate and the built-in contact schema.
//!
//! A schema is an ordered table of [`FieldSpec`]s, built once at startup and
//! read-only afterwards. Construction is the only fallible step: a schema
//! that exists is guaranteed to have unique field ids and sane length bounds.
//!
//! # Domain purity
//!
//! Validation here is a pure function of its input. This module must not
//! import `tracing`; the controller logs transitions, not the schema.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    field::{FieldSpec, INVALID_EMAIL_MESSAGE},
    validation::ValidationResult,
    values::{FormValues, ValidatedValues},
};

/// Default lower bound for the contact message, in characters.
pub const DEFAULT_MESSAGE_MIN: usize = 150;
/// Default upper bound for the contact message, in characters.
pub const DEFAULT_MESSAGE_MAX: usize = 1000;

// ── Aggregate root ────────────────────────────────────────────────────────────

/// Ordered mapping from field id to its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    /// Validate every declared field.
    ///
    /// Keys in `values` that the schema does not declare are ignored;
    /// declared fields missing from `values` are checked as `""`.
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        let mut result = ValidationResult::new();
        for field in &self.fields {
            if let Some(message) = field.check(values.get(field.name())) {
                result.insert(field.name(), message);
            }
        }
        result
    }

    /// Error for a single field, `None` if it passes or is undeclared.
    pub fn validate_field(&self, name: &str, values: &FormValues) -> Option<String> {
        self.field(name)
            .and_then(|field| field.check(values.get(name)))
    }

    /// Validate and, on success, return the values as [`ValidatedValues`].
    pub fn parse(&self, values: &FormValues) -> Result<ValidatedValues, ValidationResult> {
        let result = self.validate(values);
        if result.is_valid() {
            Ok(ValidatedValues::from_schema(self, values))
        } else {
            Err(result)
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects field declarations; [`build`](Self::build) checks them.
#[derive(Debug, Default)]
pub struct FormSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Fail fast on duplicate ids, inverted bounds or an empty field list.
    pub fn build(self) -> Result<FormSchema, DomainError> {
        if self.fields.is_empty() {
            return Err(DomainError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name()) {
                return Err(DomainError::DuplicateField {
                    field: field.name().to_string(),
                });
            }
        }

        Ok(FormSchema {
            fields: self.fields,
        })
    }
}

// ── Contact form ──────────────────────────────────────────────────────────────

/// Tunables for [`contact_schema_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSchemaOptions {
    pub message_min: usize,
    pub message_max: usize,
}

impl Default for ContactSchemaOptions {
    fn default() -> Self {
        Self {
            message_min: DEFAULT_MESSAGE_MIN,
            message_max: DEFAULT_MESSAGE_MAX,
        }
    }
}

/// The contact form with default message bounds.
pub fn contact_schema() -> Result<FormSchema, DomainError> {
    contact_schema_with(ContactSchemaOptions::default())
}

/// The contact form: `name` (required), `email` (format), `message` (length).
pub fn contact_schema_with(options: ContactSchemaOptions) -> Result<FormSchema, DomainError> {
    FormSchema::builder()
        .field(FieldSpec::text("name").required("Please enter your name"))
        .field(FieldSpec::email("email").email_format(INVALID_EMAIL_MESSAGE))
        .field(FieldSpec::text("message").length(options.message_min, options.message_max))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldKind;

    fn contact_values(name: &str, email: &str, message: &str) -> FormValues {
        FormValues::from_pairs([("name", name), ("email", email), ("message", message)])
    }

    fn valid_values() -> FormValues {
        contact_values("Jane Doe", "jane@example.com", &"m".repeat(200))
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn contact_schema_declares_three_fields_in_order() {
        let schema = contact_schema().unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, ["name", "email", "message"]);
        assert_eq!(schema.field("email").unwrap().kind(), FieldKind::Email);
    }

    #[test]
    fn duplicate_field_fails_fast() {
        let result = FormSchema::builder()
            .field(FieldSpec::text("name"))
            .field(FieldSpec::email("name"))
            .build();

        assert_eq!(
            result,
            Err(DomainError::DuplicateField {
                field: "name".into()
            })
        );
    }

    #[test]
    fn inverted_bounds_fail_fast() {
        let result = contact_schema_with(ContactSchemaOptions {
            message_min: 500,
            message_max: 100,
        });
        assert!(matches!(result, Err(DomainError::InvertedLength { .. })));
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert_eq!(FormSchema::builder().build(), Err(DomainError::EmptySchema));
    }

    #[test]
    fn empty_field_name_is_rejected() {
        let result = FormSchema::builder().field(FieldSpec::text("")).build();
        assert!(matches!(result, Err(DomainError::InvalidFieldName { .. })));
    }

    // ── validation ────────────────────────────────────────────────────────────

    #[test]
    fn validate_is_idempotent() {
        let schema = contact_schema().unwrap();
        let values = contact_values("", "nope", "short");
        assert_eq!(schema.validate(&values), schema.validate(&values));
    }

    #[test]
    fn validate_does_not_mutate_input() {
        let schema = contact_schema().unwrap();
        let values = contact_values("", "nope", "short");
        let before = values.clone();
        let _ = schema.validate(&values);
        assert_eq!(values, before);
    }

    #[test]
    fn name_is_required() {
        let schema = contact_schema().unwrap();
        let result = schema.validate(&contact_values("", "a@b.co", &"m".repeat(150)));
        assert_eq!(result.get("name"), Some("Please enter your name"));

        let result = schema.validate(&contact_values("Jane", "a@b.co", &"m".repeat(150)));
        assert_eq!(result.get("name"), None);
    }

    #[test]
    fn whitespace_name_counts_as_content() {
        let schema = contact_schema().unwrap();
        let result = schema.validate(&contact_values("  ", "a@b.co", &"m".repeat(150)));
        assert!(!result.contains("name"));
    }

    #[test]
    fn email_format_is_checked() {
        let schema = contact_schema().unwrap();
        let result = schema.validate(&contact_values("Jane", "not-an-email", ""));
        assert_eq!(result.get("email"), Some("Please enter a valid email"));

        let result = schema.validate(&contact_values("Jane", "a@b.co", ""));
        assert!(!result.contains("email"));
    }

    #[test]
    fn message_length_bounds() {
        let schema = contact_schema().unwrap();
        let check = |len: usize| {
            schema
                .validate(&contact_values("Jane", "a@b.co", &"m".repeat(len)))
                .get("message")
                .map(str::to_string)
        };

        assert!(check(149).unwrap().contains("Too short"));
        assert_eq!(check(150), None);
        assert_eq!(check(1000), None);
        assert!(check(1001).unwrap().contains("Too long"));
    }

    #[test]
    fn empty_values_report_every_field() {
        let schema = contact_schema().unwrap();
        let result = schema.validate(&FormValues::for_schema(&schema));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn absent_fields_are_treated_as_empty() {
        let schema = contact_schema().unwrap();
        let result = schema.validate(&FormValues::default());
        assert_eq!(result.get("name"), Some("Please enter your name"));
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let schema = contact_schema().unwrap();
        let values = FormValues::from_pairs([
            ("name", "Jane"),
            ("email", "jane@example.com"),
            ("message", "m".repeat(200).as_str()),
            ("phone", ""),
        ]);
        assert!(schema.validate(&values).is_valid());
    }

    #[test]
    fn validate_field_checks_one_field() {
        let schema = contact_schema().unwrap();
        let values = contact_values("", "bad", "");
        assert_eq!(
            schema.validate_field("email", &values).as_deref(),
            Some("Please enter a valid email")
        );
        assert_eq!(schema.validate_field("phone", &values), None);
    }

    #[test]
    fn parse_returns_validated_values_or_errors() {
        let schema = contact_schema().unwrap();

        let validated = schema.parse(&valid_values()).unwrap();
        assert_eq!(validated.get("name"), Some("Jane Doe"));

        let errors = schema.parse(&contact_values("", "", "")).unwrap_err();
        assert!(!errors.is_valid());
    }

    #[test]
    fn custom_bounds_apply() {
        let schema = contact_schema_with(ContactSchemaOptions {
            message_min: 1,
            message_max: 5,
        })
        .unwrap();
        let result = schema.validate(&contact_values("Jane", "a@b.co", "hello!"));
        assert!(result.get("message").unwrap().contains("at most 5"));
    }
}
