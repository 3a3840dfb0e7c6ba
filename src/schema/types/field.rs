use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::data::FormData;

/// The kind of input a field represents.
///
/// Serialized with the wire names used by the JSON schema format
/// (`string`, `number`, `boolean`, `date`, `enum`, `array`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "enum")]
    Enum,
    #[serde(rename = "array")]
    MultiSelect,
}

impl FieldKind {
    /// Name used in the JSON schema wire format.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Enum => "enum",
            FieldKind::MultiSelect => "array",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldKind::Text),
            "number" => Some(FieldKind::Number),
            "boolean" => Some(FieldKind::Boolean),
            "date" => Some(FieldKind::Date),
            "enum" => Some(FieldKind::Enum),
            "array" => Some(FieldKind::MultiSelect),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One selectable option of an enum or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Per-kind validation constraints.
///
/// Each variant carries only the constraints its field kind honors, so an
/// inapplicable constraint cannot be expressed. A variant attached to a field
/// of a different kind is ignored by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    /// Constraints on string values. A non-string value under a text field
    /// is a host wiring error; text rules do not coerce it, leaving only the
    /// requiredness check.
    Text {
        min_length: Option<usize>,
        pattern: Option<String>,
        message: Option<String>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        message: Option<String>,
    },
    MultiSelect {
        min: Option<usize>,
        message: Option<String>,
    },
}

impl ValidationRule {
    /// Whether this rule variant is the one a field of `kind` honors.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (ValidationRule::Text { .. }, FieldKind::Text)
                | (ValidationRule::Number { .. }, FieldKind::Number)
                | (ValidationRule::MultiSelect { .. }, FieldKind::MultiSelect)
        )
    }
}

/// Gates a field's visibility and validation on another field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDependency {
    pub field: String,
    pub value: JsonValue,
}

impl FieldDependency {
    pub fn new(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the referenced field currently holds the gating value.
    pub fn is_satisfied(&self, record: &FormData) -> bool {
        record.get(&self.field) == Some(&self.value)
    }
}

/// Declarative definition of one form field.
///
/// `id` is assigned at creation and never changes; it is the field's list
/// identity, independent of later renames or descriptor replacements. `kind`
/// is immutable as well: changing a field's kind is modeled as replacing the
/// whole descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub id: Uuid,
    pub kind: FieldKind,
    pub name: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub rule: Option<ValidationRule>,
    pub choices: Vec<Choice>,
    pub depends_on: Option<FieldDependency>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            label: label.into(),
            required: false,
            placeholder: None,
            rule: None,
            choices: Vec::new(),
            depends_on: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_depends_on(mut self, depends_on: FieldDependency) -> Self {
        self.depends_on = Some(depends_on);
        self
    }

    /// The rule to honor during validation: the attached rule when its
    /// variant matches this field's kind, otherwise nothing.
    pub fn active_rule(&self) -> Option<&ValidationRule> {
        self.rule.as_ref().filter(|rule| rule.applies_to(self.kind))
    }
}
