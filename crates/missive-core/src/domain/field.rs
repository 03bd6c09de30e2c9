//! Field declarations: kinds, constraints and the `FieldSpec` value object.
//!
//! A field is a named input with an ordered list of constraints. Each
//! constraint carries the message it reports on failure, so a schema is a
//! plain runtime table of `(predicate, message)` pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;

/// `local@domain.tld`: non-empty local part, one `@`, at least two
/// non-empty dot-separated domain labels.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is a valid regex")
});

/// Default message for a failed email-format constraint.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email";

// ── FieldKind ─────────────────────────────────────────────────────────────────

/// Input kind, used by presentation to pick a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown field kind '{other}'")),
        }
    }
}

// ── Constraint ────────────────────────────────────────────────────────────────

/// A single rule a field value must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// Fails on the empty string. Whitespace counts as content.
    Required { message: String },
    /// Fails unless the value looks like `local@domain.tld`.
    Email { message: String },
    /// Fails when the character count is outside `min..=max`.
    Length { min: usize, max: usize },
}

impl Constraint {
    /// Check `value`, returning the failure message if the rule is violated.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Self::Required { message } => {
                if value.is_empty() {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
            Self::Email { message } => {
                if EMAIL_PATTERN.is_match(value) {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }
            Self::Length { min, max } => {
                let len = value.chars().count();
                if len < *min {
                    Err(format!("Too short: must be at least {min} characters"))
                } else if len > *max {
                    Err(format!("Too long: must be at most {max} characters"))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Short human description, e.g. `length 150..=1000`.
    pub fn describe(&self) -> String {
        match self {
            Self::Required { .. } => "required".into(),
            Self::Email { .. } => "email format".into(),
            Self::Length { min, max } => format!("length {min}..={max}"),
        }
    }
}

// ── FieldSpec ─────────────────────────────────────────────────────────────────

/// Declaration of one form field.
///
/// Built with chained constructors and checked once by
/// [`FormSchemaBuilder::build`](super::FormSchemaBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    label: String,
    constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let label = default_label(&name);
        Self {
            name,
            kind,
            label,
            constraints: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Required {
            message: message.into(),
        });
        self
    }

    pub fn email_format(mut self, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Email {
            message: message.into(),
        });
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.constraints.push(Constraint::Length { min, max });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn label_text(&self) -> &str {
        &self.label
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Run constraints in declared order; the first failure wins.
    pub fn check(&self, value: &str) -> Option<String> {
        self.constraints
            .iter()
            .find_map(|constraint| constraint.check(value).err())
    }

    /// Structural checks performed at schema build time.
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidFieldName {
                field: self.name.clone(),
                reason: "name cannot be empty".into(),
            });
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidFieldName {
                field: self.name.clone(),
                reason: "name cannot contain whitespace".into(),
            });
        }

        for constraint in &self.constraints {
            if let Constraint::Length { min, max } = constraint {
                if min > max {
                    return Err(DomainError::InvertedLength {
                        field: self.name.clone(),
                        min: *min,
                        max: *max,
                    });
                }
            }
        }

        Ok(())
    }
}

/// `message` → `Your message`.
fn default_label(name: &str) -> String {
    format!("Your {}", name.replace(['_', '-'], " "))
}
