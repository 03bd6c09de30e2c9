//! Field values: the live `FormValues`, the validated `ValidatedValues`
//! produced by [`FormSchema::parse`](super::FormSchema::parse), and the
//! typed `ContactDetails` view handed to submission handlers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{error::DomainError, schema::FormSchema};

/// Current string value of every declared field.
///
/// Created from a schema with every field set to `""`; only declared fields
/// can be written, so a declared field is never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    /// Empty values for every field of `schema`.
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self {
            values: schema
                .fields()
                .iter()
                .map(|f| (f.name().to_string(), String::new()))
                .collect(),
        }
    }

    /// Loose values, not tied to a schema. Undeclared keys are ignored by
    /// validation; declared keys that are absent read as `""`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `field`, `""` if absent.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Overwrite a declared field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), DomainError> {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DomainError::UnknownField {
                field: field.to_string(),
            }),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Result<Self, DomainError> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Values that passed every constraint of the schema that produced them.
///
/// Only [`FormSchema::parse`](super::FormSchema::parse) constructs this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedValues {
    values: BTreeMap<String, String>,
}

impl ValidatedValues {
    pub(crate) fn from_schema(schema: &FormSchema, values: &FormValues) -> Self {
        Self {
            values: schema
                .fields()
                .iter()
                .map(|f| (f.name().to_string(), values.get(f.name()).to_string()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }
}

/// The contact form's validated values, shaped explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDetails {
    pub const FIELDS: [&'static str; 3] = ["name", "email", "message"];
}

impl TryFrom<&ValidatedValues> for ContactDetails {
    type Error = DomainError;

    fn try_from(values: &ValidatedValues) -> Result<Self, Self::Error> {
        let take = |field: &'static str| {
            values
                .get(field)
                .map(str::to_string)
                .ok_or(DomainError::MissingField { field })
        };

        Ok(Self {
            name: take("name")?,
            email: take("email")?,
            message: take("message")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldSpec, FormSchema, contact_schema};

    #[test]
    fn values_start_empty_for_every_field() {
        let schema = contact_schema().unwrap();
        let values = FormValues::for_schema(&schema);

        assert_eq!(values.len(), 3);
        for field in ContactDetails::FIELDS {
            assert!(values.contains(field));
            assert_eq!(values.get(field), "");
        }
    }

    #[test]
    fn setting_undeclared_field_is_rejected() {
        let mut values = FormValues::for_schema(&contact_schema().unwrap());
        assert_eq!(
            values.set("phone", "123"),
            Err(DomainError::UnknownField {
                field: "phone".into()
            })
        );
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let values = FormValues::from_pairs([("name", "Jane")]);
        assert_eq!(values.get("email"), "");
    }

    #[test]
    fn contact_details_need_every_field() {
        let schema = FormSchema::builder()
            .field(FieldSpec::text("name"))
            .build()
            .unwrap();
        let validated = schema
            .parse(&FormValues::from_pairs([("name", "Jane")]))
            .unwrap();

        assert_eq!(
            ContactDetails::try_from(&validated),
            Err(DomainError::MissingField { field: "email" })
        );
    }

    #[test]
    fn validated_values_drop_undeclared_keys() {
        let schema = FormSchema::builder()
            .field(FieldSpec::text("name"))
            .build()
            .unwrap();
        let validated = schema
            .parse(&FormValues::from_pairs([("name", "Jane"), ("extra", "x")]))
            .unwrap();

        assert_eq!(validated.get("extra"), None);
        assert_eq!(validated.into_inner().len(), 1);
    }
}
