/// Structural failures of schema parsing and editing.
///
/// Per-field validation failures are ordinary return data
/// ([`super::ValidationError`]) and never surface through this type; this
/// error covers malformed schema documents and invalid editor operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The schema document as a whole is malformed.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// One field definition inside a schema document is malformed.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// A field name already exists in the schema.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A positional editor operation referenced a nonexistent index.
    #[error("Field index {index} is out of range for a schema with {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}
