//! Form filling session state.
//!
//! Holds a schema, the record being edited, and the last round of validation
//! errors. Matches the submission flow of an interactive form: an error for a
//! field is cleared the moment that field's value changes, whether or not the
//! new value is valid, and full re-validation happens on the next submit.

use log::info;
use serde_json::Value as JsonValue;

use super::types::{FieldDescriptor, FormData, FormSchema, ValidationError};
use super::validation;

pub struct FormSession {
    schema: FormSchema,
    data: FormData,
    errors: Vec<ValidationError>,
}

impl FormSession {
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        Self::with_initial_values(schema, FormData::new())
    }

    #[must_use]
    pub fn with_initial_values(schema: FormSchema, data: FormData) -> Self {
        Self {
            schema,
            data,
            errors: Vec::new(),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Errors from the last failed submit, minus any cleared by later edits.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Store a field value and clear that field's pending error.
    pub fn set_value(&mut self, name: &str, value: impl Into<JsonValue>) {
        self.data.set(name, value);
        self.errors.retain(|error| error.field != name);
    }

    /// The pending error message for one field, if any.
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == name)
            .map(|error| error.message.as_str())
    }

    /// The fields a renderer should currently display, in schema order.
    pub fn visible_fields(&self) -> Vec<&FieldDescriptor> {
        validation::visible_fields(&self.schema.fields, &self.data)
    }

    /// Validate the whole record. On success the record is handed back for
    /// the caller's submission boundary; on failure the errors are stored
    /// (replacing any previous round) and returned.
    pub fn submit(&mut self) -> Result<&FormData, &[ValidationError]> {
        let errors = validation::validate_form(&self.schema.fields, &self.data);
        if errors.is_empty() {
            self.errors.clear();
            info!("Form '{}' submitted cleanly", self.schema.title);
            Ok(&self.data)
        } else {
            info!(
                "Form '{}' failed validation with {} error(s)",
                self.schema.title,
                errors.len()
            );
            self.errors = errors;
            Err(&self.errors)
        }
    }
}
