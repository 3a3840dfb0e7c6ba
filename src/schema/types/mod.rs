pub mod data;
pub mod errors;
pub mod field;
pub mod schema;

pub use data::{FormData, ValidationError};
pub use errors::SchemaError;
pub use field::{Choice, FieldDependency, FieldDescriptor, FieldKind, ValidationRule};
pub use schema::FormSchema;
