//! Field and form validation.
//!
//! Validation is pure: a field descriptor, a candidate value, and the full
//! record go in, an optional error message comes out. Nothing is thrown;
//! failures are ordinary data for the caller to render. Default messages
//! live in a [`MessageCatalog`] so a host can swap the wording without
//! touching the rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use super::types::{FieldDescriptor, FieldKind, FormData, ValidationError, ValidationRule};

/// Default message templates, one per rule kind.
///
/// Placeholders (`{label}`, `{min_length}`, `{min}`, `{max}`) are substituted
/// when the message is produced. An author-supplied rule `message` always
/// takes precedence over the catalog.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pub required: String,
    pub min_length: String,
    pub invalid_format: String,
    pub invalid_number: String,
    pub min_value: String,
    pub max_value: String,
    pub min_selected: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            required: "{label} is required".to_string(),
            min_length: "Minimum length is {min_length}".to_string(),
            invalid_format: "Invalid format".to_string(),
            invalid_number: "Must be a valid number".to_string(),
            min_value: "Minimum value is {min}".to_string(),
            max_value: "Maximum value is {max}".to_string(),
            min_selected: "Select at least {min} option(s)".to_string(),
        }
    }
}

impl MessageCatalog {
    fn required_message(&self, label: &str) -> String {
        self.required.replace("{label}", label)
    }

    fn min_length_message(&self, min_length: usize) -> String {
        self.min_length
            .replace("{min_length}", &min_length.to_string())
    }

    fn min_value_message(&self, min: f64) -> String {
        self.min_value.replace("{min}", &format_number(min))
    }

    fn max_value_message(&self, max: f64) -> String {
        self.max_value.replace("{max}", &format_number(max))
    }

    fn min_selected_message(&self, min: usize) -> String {
        self.min_selected.replace("{min}", &min.to_string())
    }
}

static DEFAULT_MESSAGES: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::default);

/// Validates fields and whole records against a schema's field list.
///
/// Borrows the message catalog it reports defaults from; use the free
/// functions in this module when the default catalog is fine.
pub struct FormValidator<'a> {
    messages: &'a MessageCatalog,
}

impl<'a> FormValidator<'a> {
    pub fn new(messages: &'a MessageCatalog) -> Self {
        Self { messages }
    }

    /// Validate one field against its current value, with the full record
    /// available for dependency checks. Returns the first failing rule's
    /// message, or `None` when the field passes or is gated off.
    pub fn validate_field(
        &self,
        field: &FieldDescriptor,
        value: Option<&JsonValue>,
        record: &FormData,
    ) -> Option<String> {
        // An unsatisfied dependency gate suspends all validation for the
        // field, whatever its own value holds.
        if let Some(dep) = &field.depends_on {
            if !dep.is_satisfied(record) {
                return None;
            }
        }

        let empty = is_empty_value(value);
        if field.required && empty {
            return Some(self.messages.required_message(&field.label));
        }
        if empty {
            return None;
        }
        let value = value?;

        match field.kind {
            FieldKind::Text => self.check_text(field, value),
            FieldKind::Number => self.check_number(field, value),
            FieldKind::MultiSelect => self.check_multi_select(field, value),
            // Correctness of these is the input control's concern.
            FieldKind::Boolean | FieldKind::Date | FieldKind::Enum => None,
        }
    }

    /// Validate every field in schema order, collecting all failures.
    pub fn validate_form(
        &self,
        fields: &[FieldDescriptor],
        record: &FormData,
    ) -> Vec<ValidationError> {
        fields
            .iter()
            .filter_map(|field| {
                self.validate_field(field, record.get(&field.name), record)
                    .map(|message| ValidationError::new(&field.name, message))
            })
            .collect()
    }

    fn check_text(&self, field: &FieldDescriptor, value: &JsonValue) -> Option<String> {
        let Some(ValidationRule::Text {
            min_length,
            pattern,
            message,
        }) = field.active_rule()
        else {
            return None;
        };
        // Text rules apply to string values only; a non-string value under a
        // text field is the host's wiring error, not coerced (see
        // `ValidationRule::Text`).
        let text = value.as_str()?;

        if let Some(min_length) = min_length {
            if text.chars().count() < *min_length {
                return Some(
                    message
                        .clone()
                        .unwrap_or_else(|| self.messages.min_length_message(*min_length)),
                );
            }
        }
        if let Some(pattern) = pattern {
            if !pattern_matches(pattern, text) {
                return Some(
                    message
                        .clone()
                        .unwrap_or_else(|| self.messages.invalid_format.clone()),
                );
            }
        }
        None
    }

    fn check_number(&self, field: &FieldDescriptor, value: &JsonValue) -> Option<String> {
        // The numeric-coercion check fires for any non-empty value, even on
        // optional fields and fields without a rule.
        let Some(number) = numeric_value(value) else {
            return Some(self.messages.invalid_number.clone());
        };
        let Some(ValidationRule::Number { min, max, message }) = field.active_rule() else {
            return None;
        };

        if let Some(min) = min {
            if number < *min {
                return Some(
                    message
                        .clone()
                        .unwrap_or_else(|| self.messages.min_value_message(*min)),
                );
            }
        }
        if let Some(max) = max {
            if number > *max {
                return Some(
                    message
                        .clone()
                        .unwrap_or_else(|| self.messages.max_value_message(*max)),
                );
            }
        }
        None
    }

    fn check_multi_select(&self, field: &FieldDescriptor, value: &JsonValue) -> Option<String> {
        let Some(ValidationRule::MultiSelect { min, message }) = field.active_rule() else {
            return None;
        };
        if let Some(min) = min {
            let enough = value
                .as_array()
                .map_or(false, |selected| selected.len() >= *min);
            if !enough {
                return Some(
                    message
                        .clone()
                        .unwrap_or_else(|| self.messages.min_selected_message(*min)),
                );
            }
        }
        None
    }
}

/// Validate one field with the default message catalog.
pub fn validate_field(
    field: &FieldDescriptor,
    value: Option<&JsonValue>,
    record: &FormData,
) -> Option<String> {
    FormValidator::new(&DEFAULT_MESSAGES).validate_field(field, value, record)
}

/// Validate a field list with the default message catalog.
pub fn validate_form(fields: &[FieldDescriptor], record: &FormData) -> Vec<ValidationError> {
    FormValidator::new(&DEFAULT_MESSAGES).validate_form(fields, record)
}

/// Whether a renderer should display the field for the given record.
///
/// Agrees with the validator's dependency gate: an invisible field is never
/// validated.
pub fn is_field_visible(field: &FieldDescriptor, record: &FormData) -> bool {
    field
        .depends_on
        .as_ref()
        .map_or(true, |dep| dep.is_satisfied(record))
}

/// The fields a renderer should display, in schema order.
pub fn visible_fields<'a>(
    fields: &'a [FieldDescriptor],
    record: &FormData,
) -> Vec<&'a FieldDescriptor> {
    fields
        .iter()
        .filter(|field| is_field_visible(field, record))
        .collect()
}

/// Absent, JSON null, and the empty string all count as "no value".
fn is_empty_value(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Numeric coercion: JSON numbers and strings that parse as a finite f64 are
/// numeric, everything else is not. NaN and the infinities would slip through
/// every bound comparison, so they do not count as numbers.
fn numeric_value(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        JsonValue::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Full-match pattern test. A pattern that fails to compile counts as a
/// mismatch; bad patterns are a schema-author error and surface as ordinary
/// validation data rather than a panic.
fn pattern_matches(pattern: &str, text: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(regex) => regex.is_match(text),
        Err(_) => false,
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}
