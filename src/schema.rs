//! Declarative field schemas handed to the extraction service.

use serde_json::{json, Map, Value};

/// JSON type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text.
    String,
    /// Decimal number.
    Number,
    /// Whole number.
    Integer,
    /// True or false.
    Boolean,
}

impl FieldType {
    /// Name of the type in JSON Schema.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
        }
    }
}

/// A named, typed, described field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key the service should produce.
    pub name: String,
    /// Expected JSON type.
    pub kind: FieldType,
    /// Hint for the extraction model.
    pub description: String,
}

/// Ordered list of fields describing one extracted object.
///
/// Every declared field is marked required in the rendered JSON Schema.
///
/// ```
/// use product_scraper::{FieldType, Schema};
///
/// let schema = Schema::new()
///     .field("title", FieldType::String, "Page title")
///     .field("rating", FieldType::Number, "Average rating");
///
/// let rendered = schema.to_json_schema();
/// assert_eq!(rendered["required"][1], "rating");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. A later field with the same name replaces the earlier one.
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldType,
        description: impl Into<String>,
    ) -> Self {
        let field = Field {
            name: name.into(),
            kind,
            description: description.into(),
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Render as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for f in &self.fields {
            properties.insert(
                f.name.clone(),
                json!({"type": f.kind.as_str(), "description": f.description}),
            );
        }
        let required: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
