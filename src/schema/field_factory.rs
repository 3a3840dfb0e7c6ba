//! Default field construction for the builder palette.

use super::types::{Choice, FieldDescriptor, FieldKind, ValidationRule};

/// Produces the default descriptor for a freshly dropped field of a given
/// kind. Deterministic apart from the generated stable id.
pub struct FieldFactory;

impl FieldFactory {
    /// Create a field named after its intended position in the schema:
    /// `field_{position}` with label `Field {position + 1}`.
    #[must_use]
    pub fn create_field(kind: FieldKind, position: usize) -> FieldDescriptor {
        let base = FieldDescriptor::new(
            kind,
            format!("field_{position}"),
            format!("Field {}", position + 1),
        );

        match kind {
            FieldKind::Text => base.with_placeholder("Enter text..."),
            FieldKind::Number => base
                .with_placeholder("Enter number...")
                .with_rule(ValidationRule::Number {
                    min: Some(0.0),
                    max: None,
                    message: None,
                }),
            FieldKind::Enum => base.with_choices(vec![
                Choice::new("option1", "Option 1"),
                Choice::new("option2", "Option 2"),
            ]),
            FieldKind::MultiSelect => base.with_choices(vec![
                Choice::new("choice1", "Choice 1"),
                Choice::new("choice2", "Choice 2"),
            ]),
            FieldKind::Boolean | FieldKind::Date => base,
        }
    }
}
