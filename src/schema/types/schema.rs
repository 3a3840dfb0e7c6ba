use super::field::FieldDescriptor;

/// An ordered collection of field descriptors plus a title.
///
/// Field order is semantic: it is the render order, the edit order, and the
/// index space of the editor's positional operations. The validator only
/// reads a schema; all mutation goes through [`crate::schema::SchemaEditor`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field without any uniqueness check. Schema authoring code
    /// should prefer the editor, which rejects duplicate names.
    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field name that appears more than once, if any.
    pub(crate) fn first_duplicate_name(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.fields
            .iter()
            .find(|field| !seen.insert(field.name.as_str()))
            .map(|field| field.name.as_str())
    }
}
