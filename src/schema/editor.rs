//! Interactive schema editing.
//!
//! The editor owns the single current [`FormSchema`] of a builder session and
//! applies discrete, atomic operations to it: every operation validates its
//! inputs before touching the schema, so a failed call leaves the previous
//! value fully intact. The editor keeps no undo history; callers wanting undo
//! clone the schema before editing.

use log::info;

use super::field_factory::FieldFactory;
use super::parsing;
use super::types::{FieldDescriptor, FieldKind, FormSchema, SchemaError};

pub struct SchemaEditor {
    schema: FormSchema,
}

impl SchemaEditor {
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        Self { schema }
    }

    /// The current schema value.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn into_schema(self) -> FormSchema {
        self.schema
    }

    /// Append a field to the end of the schema. Rejects a name that already
    /// exists, since record lookups by name would become ambiguous.
    pub fn append_field(&mut self, field: FieldDescriptor) -> Result<(), SchemaError> {
        if self.schema.contains_field(&field.name) {
            return Err(SchemaError::DuplicateField(field.name));
        }
        info!(
            "Appending {} field '{}' to schema '{}'",
            field.kind, field.name, self.schema.title
        );
        self.schema.add_field(field);
        Ok(())
    }

    /// Append a factory-default field of the given kind, as the builder's
    /// palette drop does. Returns the new field's position.
    ///
    /// The factory derives names from positions; after removals the next
    /// positional name can still be taken, so the position is advanced past
    /// any collisions.
    pub fn add_field(&mut self, kind: FieldKind) -> Result<usize, SchemaError> {
        let mut position = self.schema.len();
        while self.schema.contains_field(&format!("field_{position}")) {
            position += 1;
        }
        self.append_field(FieldFactory::create_field(kind, position))?;
        Ok(self.schema.len() - 1)
    }

    /// Remove the field at `index`, shifting later fields down by one.
    pub fn remove_field_at(&mut self, index: usize) -> Result<FieldDescriptor, SchemaError> {
        self.check_index(index)?;
        let field = self.schema.fields.remove(index);
        info!(
            "Removed field '{}' from schema '{}'",
            field.name, self.schema.title
        );
        Ok(field)
    }

    /// Relocate the field at `from` to position `to`, preserving the relative
    /// order of all other fields.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), SchemaError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let field = self.schema.fields.remove(from);
            self.schema.fields.insert(to, field);
        }
        Ok(())
    }

    /// Replace the descriptor at `index` wholesale. This is also how a kind
    /// change is expressed, since `kind` is immutable on a descriptor.
    pub fn update_field_at(
        &mut self,
        index: usize,
        field: FieldDescriptor,
    ) -> Result<(), SchemaError> {
        self.check_index(index)?;
        let taken = self
            .schema
            .fields
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.name == field.name);
        if taken {
            return Err(SchemaError::DuplicateField(field.name));
        }
        self.schema.fields[index] = field;
        Ok(())
    }

    /// Replace the whole schema from raw JSON text. On any parse or
    /// structural failure the current schema is left untouched.
    pub fn replace_from_text(&mut self, raw: &str) -> Result<(), SchemaError> {
        let schema = parsing::parse_schema_json(raw)?;
        info!(
            "Replacing schema '{}' with '{}' ({} fields)",
            self.schema.title,
            schema.title,
            schema.len()
        );
        self.schema = schema;
        Ok(())
    }

    /// Pretty-printed JSON of the current schema, the round-trip counterpart
    /// of [`Self::replace_from_text`].
    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        parsing::schema_to_json_string(&self.schema)
    }

    fn check_index(&self, index: usize) -> Result<(), SchemaError> {
        if index >= self.schema.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.schema.len(),
            });
        }
        Ok(())
    }
}
