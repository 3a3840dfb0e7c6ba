//! JSON schema document parsing and serialization.
//!
//! This module contains the logic for:
//! - Parsing raw JSON text into a [`FormSchema`]
//! - Structural validation (title, fields, per-field kind/name/label, name
//!   uniqueness)
//! - Converting the wire format's loose validation bag into the typed
//!   per-kind [`ValidationRule`] and back
//!
//! The wire format matches the original builder documents: fields carry
//! `type`, `name`, `label` and optional `required`, `placeholder`,
//! `validation`, `options`, `dependsOn`. Stable ids are carried as an
//! optional `id` member and regenerated when a document omits them, so
//! id-less documents load unchanged.

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{
    Choice, FieldDependency, FieldDescriptor, FieldKind, FormSchema, SchemaError, ValidationRule,
};

/// Top-level shape of a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaDocument {
    pub title: String,
    pub fields: Vec<JsonFieldDefinition>,
}

/// One field as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<JsonValidationBag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Choice>,
    #[serde(rename = "dependsOn", default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldDependency>,
}

/// The wire format's untyped constraint bag. Only the subset relevant to the
/// field's kind survives conversion; the rest is dropped silently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonValidationBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Parse and structurally validate raw JSON schema text.
pub fn parse_schema_json(raw: &str) -> Result<FormSchema, SchemaError> {
    let document: JsonSchemaDocument = serde_json::from_str(raw)
        .map_err(|e| SchemaError::InvalidSchema(format!("invalid schema document: {e}")))?;
    interpret_document(document)
}

/// Convert a parsed document into a [`FormSchema`], enforcing the structural
/// invariants the raw shape cannot express.
pub fn interpret_document(document: JsonSchemaDocument) -> Result<FormSchema, SchemaError> {
    let mut schema = FormSchema::new(document.title);
    for (position, json_field) in document.fields.into_iter().enumerate() {
        schema.add_field(convert_field(json_field, position)?);
    }
    if let Some(name) = schema.first_duplicate_name() {
        return Err(SchemaError::DuplicateField(name.to_string()));
    }

    info!(
        "Parsed schema '{}' with {} fields",
        schema.title,
        schema.len()
    );
    Ok(schema)
}

/// Converts one wire field definition into a [`FieldDescriptor`].
pub fn convert_field(
    json_field: JsonFieldDefinition,
    position: usize,
) -> Result<FieldDescriptor, SchemaError> {
    if json_field.kind.is_empty() {
        return Err(SchemaError::InvalidField(format!(
            "field at position {position} is missing a type"
        )));
    }
    let kind = FieldKind::from_wire_name(&json_field.kind).ok_or_else(|| {
        SchemaError::InvalidField(format!(
            "field at position {position} has unknown type '{}'",
            json_field.kind
        ))
    })?;
    if json_field.name.is_empty() {
        return Err(SchemaError::InvalidField(format!(
            "field at position {position} is missing a name"
        )));
    }
    if json_field.label.is_empty() {
        return Err(SchemaError::InvalidField(format!(
            "field '{}' is missing a label",
            json_field.name
        )));
    }

    Ok(FieldDescriptor {
        id: json_field.id.unwrap_or_else(Uuid::new_v4),
        kind,
        name: json_field.name,
        label: json_field.label,
        required: json_field.required,
        placeholder: json_field.placeholder,
        rule: json_field.validation.and_then(|bag| convert_rule(kind, bag)),
        choices: json_field.options,
        depends_on: json_field.depends_on,
    })
}

/// Keep the bag entries the kind honors, drop the rest.
fn convert_rule(kind: FieldKind, bag: JsonValidationBag) -> Option<ValidationRule> {
    match kind {
        FieldKind::Text => Some(ValidationRule::Text {
            min_length: bag.min_length,
            pattern: bag.pattern,
            message: bag.message,
        }),
        FieldKind::Number => Some(ValidationRule::Number {
            min: bag.min,
            max: bag.max,
            message: bag.message,
        }),
        FieldKind::MultiSelect => Some(ValidationRule::MultiSelect {
            // A fractional wire minimum must not round down to a looser
            // rule; negatives clamp to zero.
            min: bag.min.map(|min| min.ceil().max(0.0) as usize),
            message: bag.message,
        }),
        FieldKind::Boolean | FieldKind::Date | FieldKind::Enum => None,
    }
}

/// Serialize a schema into its wire document.
pub fn schema_to_document(schema: &FormSchema) -> JsonSchemaDocument {
    JsonSchemaDocument {
        title: schema.title.clone(),
        fields: schema.fields.iter().map(field_to_json).collect(),
    }
}

/// Pretty-printed, stable-order serialization of a schema.
pub fn schema_to_json_string(schema: &FormSchema) -> Result<String, SchemaError> {
    serde_json::to_string_pretty(&schema_to_document(schema))
        .map_err(|e| SchemaError::InvalidSchema(format!("failed to serialize schema: {e}")))
}

fn field_to_json(field: &FieldDescriptor) -> JsonFieldDefinition {
    JsonFieldDefinition {
        id: Some(field.id),
        kind: field.kind.wire_name().to_string(),
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        placeholder: field.placeholder.clone(),
        validation: field.rule.as_ref().map(rule_to_bag),
        options: field.choices.clone(),
        depends_on: field.depends_on.clone(),
    }
}

fn rule_to_bag(rule: &ValidationRule) -> JsonValidationBag {
    match rule {
        ValidationRule::Text {
            min_length,
            pattern,
            message,
        } => JsonValidationBag {
            min_length: *min_length,
            pattern: pattern.clone(),
            message: message.clone(),
            ..JsonValidationBag::default()
        },
        ValidationRule::Number { min, max, message } => JsonValidationBag {
            min: *min,
            max: *max,
            message: message.clone(),
            ..JsonValidationBag::default()
        },
        ValidationRule::MultiSelect { min, message } => JsonValidationBag {
            min: min.map(|min| min as f64),
            message: message.clone(),
            ..JsonValidationBag::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_document() {
        let raw = json!({
            "title": "Contact",
            "fields": [
                { "type": "string", "name": "email", "label": "Email", "required": true }
            ]
        })
        .to_string();

        let schema = parse_schema_json(&raw).unwrap();
        assert_eq!(schema.title, "Contact");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.fields[0].kind, FieldKind::Text);
        assert!(schema.fields[0].required);
    }

    #[test]
    fn missing_title_is_a_structural_error() {
        let raw = json!({ "fields": [] }).to_string();
        assert!(matches!(
            parse_schema_json(&raw),
            Err(SchemaError::InvalidSchema(_))
        ));
    }

    #[test]
    fn missing_fields_member_is_a_structural_error() {
        let raw = json!({ "title": "Contact" }).to_string();
        assert!(matches!(
            parse_schema_json(&raw),
            Err(SchemaError::InvalidSchema(_))
        ));
    }

    #[test]
    fn field_without_name_is_rejected() {
        let raw = json!({
            "title": "Contact",
            "fields": [ { "type": "string", "label": "Email" } ]
        })
        .to_string();

        let err = parse_schema_json(&raw).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField(_)));
        assert!(err.to_string().contains("missing a name"));
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let raw = json!({
            "title": "Contact",
            "fields": [ { "type": "telepathy", "name": "x", "label": "X" } ]
        })
        .to_string();

        let err = parse_schema_json(&raw).unwrap_err();
        assert!(err.to_string().contains("unknown type 'telepathy'"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let raw = json!({
            "title": "Contact",
            "fields": [
                { "type": "string", "name": "email", "label": "Email" },
                { "type": "string", "name": "email", "label": "Backup Email" }
            ]
        })
        .to_string();

        assert_eq!(
            parse_schema_json(&raw),
            Err(SchemaError::DuplicateField("email".to_string()))
        );
    }

    #[test]
    fn validation_bag_converts_per_kind() {
        let raw = json!({
            "title": "Mixed",
            "fields": [
                {
                    "type": "string", "name": "email", "label": "Email",
                    "validation": { "pattern": "a+", "minLength": 2, "min": 5 }
                },
                {
                    "type": "number", "name": "age", "label": "Age",
                    "validation": { "min": 18, "max": 100, "minLength": 7 }
                },
                {
                    "type": "boolean", "name": "ok", "label": "Ok",
                    "validation": { "min": 1 }
                }
            ]
        })
        .to_string();

        let schema = parse_schema_json(&raw).unwrap();
        assert_eq!(
            schema.fields[0].rule,
            Some(ValidationRule::Text {
                min_length: Some(2),
                pattern: Some("a+".to_string()),
                message: None,
            })
        );
        assert_eq!(
            schema.fields[1].rule,
            Some(ValidationRule::Number {
                min: Some(18.0),
                max: Some(100.0),
                message: None,
            })
        );
        // A bag on a rule-less kind is dropped entirely.
        assert_eq!(schema.fields[2].rule, None);
    }

    #[test]
    fn multi_select_minimum_rounds_up_and_clamps_negatives() {
        let raw = json!({
            "title": "Skills",
            "fields": [
                {
                    "type": "array", "name": "skills", "label": "Skills",
                    "validation": { "min": 1.9 }
                },
                {
                    "type": "array", "name": "extras", "label": "Extras",
                    "validation": { "min": -2.5 }
                }
            ]
        })
        .to_string();

        let schema = parse_schema_json(&raw).unwrap();
        assert_eq!(
            schema.fields[0].rule,
            Some(ValidationRule::MultiSelect {
                min: Some(2),
                message: None,
            })
        );
        assert_eq!(
            schema.fields[1].rule,
            Some(ValidationRule::MultiSelect {
                min: Some(0),
                message: None,
            })
        );
    }

    #[test]
    fn round_trip_preserves_schema() {
        let raw = json!({
            "title": "Profile",
            "fields": [
                {
                    "type": "enum", "name": "occupation", "label": "Occupation",
                    "required": true,
                    "options": [
                        { "value": "developer", "label": "Developer" },
                        { "value": "designer", "label": "Designer" }
                    ]
                },
                {
                    "type": "string", "name": "portfolio", "label": "Portfolio URL",
                    "dependsOn": { "field": "isEmployed", "value": true },
                    "validation": { "pattern": "https?://.*", "message": "Not a URL" }
                }
            ]
        })
        .to_string();

        let schema = parse_schema_json(&raw).unwrap();
        let text = schema_to_json_string(&schema).unwrap();
        let reparsed = parse_schema_json(&text).unwrap();
        // Ids are carried through the round trip, so the schemas are equal.
        assert_eq!(schema, reparsed);
    }
}
