//! Declarative form schemas with validation and interactive editing.
//!
//! A form is described as data: an ordered list of [`FieldDescriptor`]s with
//! types, validation rules, and visibility dependencies, wrapped in a
//! [`FormSchema`]. Against that schema the crate answers two questions about
//! a candidate [`FormData`] record: which fields are currently visible, and
//! which fail validation. A second facet, [`SchemaEditor`], mutates a schema
//! the way an interactive builder does: append, remove by position, reorder,
//! and wholesale replacement from round-tripped JSON text.
//!
//! Rendering is out of scope: for each visible field a host passes the
//! descriptor and current value to its own controls and writes changes back
//! into the record (or into a [`FormSession`], which also tracks per-field
//! errors across submits).
//!
//! ```
//! use schemaform::{validate_form, FieldDescriptor, FieldKind, FormData, FormSchema};
//!
//! let mut schema = FormSchema::new("Signup");
//! schema.add_field(FieldDescriptor::new(FieldKind::Text, "email", "Email").with_required(true));
//!
//! let record = FormData::new();
//! let errors = validate_form(&schema.fields, &record);
//! assert_eq!(errors[0].message, "Email is required");
//! ```

pub mod schema;

pub use schema::{
    is_field_visible, validate_field, validate_form, visible_fields, Choice, FieldDependency,
    FieldDescriptor, FieldKind, FieldFactory, FormData, FormSchema, FormSession, FormValidator,
    MessageCatalog, SchemaEditor, SchemaError, ValidationError, ValidationRule,
};
