pub mod editor;
pub mod field_factory;
pub mod parsing;
pub mod session;
pub mod types;
pub mod validation;

pub use editor::SchemaEditor;
pub use field_factory::FieldFactory;
pub use session::FormSession;

// Re-export all types at the schema module level
pub use types::{
    Choice, FieldDependency, FieldDescriptor, FieldKind, FormData, FormSchema, SchemaError,
    ValidationError, ValidationRule,
};
pub use validation::{
    is_field_visible, validate_field, validate_form, visible_fields, FormValidator, MessageCatalog,
};
