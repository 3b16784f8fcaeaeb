//! Normalized extraction records - the JSON-safe form that is stored and served

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// An attribute value that is safe to persist and transmit as-is
///
/// Only JSON primitives are representable. Anything richer must be rendered
/// to text first via [`PrimitiveValue::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    /// Absent value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer or floating point number
    Number(Number),
    /// Text
    String(String),
}

impl PrimitiveValue {
    /// Classify a JSON value, rendering arrays and objects as compact JSON text
    ///
    /// Total: never fails for any input.
    ///
    /// # Examples
    ///
    /// ```
    /// use pharmextract_domain::PrimitiveValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(PrimitiveValue::from_value(&json!(true)), PrimitiveValue::Bool(true));
    /// assert_eq!(
    ///     PrimitiveValue::from_value(&json!({"dose": "10mg"})),
    ///     PrimitiveValue::String(r#"{"dose":"10mg"}"#.to_string())
    /// );
    /// ```
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => PrimitiveValue::Null,
            Value::Bool(b) => PrimitiveValue::Bool(*b),
            Value::Number(n) => PrimitiveValue::Number(n.clone()),
            Value::String(s) => PrimitiveValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => PrimitiveValue::String(value.to_string()),
        }
    }
}

impl From<PrimitiveValue> for Value {
    fn from(value: PrimitiveValue) -> Self {
        match value {
            PrimitiveValue::Null => Value::Null,
            PrimitiveValue::Bool(b) => Value::Bool(b),
            PrimitiveValue::Number(n) => Value::Number(n),
            PrimitiveValue::String(s) => Value::String(s),
        }
    }
}

/// Ordered attribute map whose values are guaranteed primitive
///
/// Values are coerced on every way in, including deserialization, so a
/// nested structure can never reach storage or a response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a primitive value, keeping insertion order
    pub fn insert(&mut self, key: impl Into<String>, value: PrimitiveValue) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert any JSON value, coercing it to a primitive
    pub fn insert_coerced(&mut self, key: impl Into<String>, value: &Value) {
        self.insert(key, PrimitiveValue::from_value(value));
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in &map {
            attributes.insert_coerced(key.clone(), value);
        }
        attributes
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// A normalized extraction: category, verbatim text, primitive attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Semantic class of the span (open vocabulary)
    #[serde(rename = "extraction_class", alias = "category")]
    pub category: String,

    /// Verbatim text of the span
    #[serde(rename = "extraction_text", alias = "text")]
    pub text: String,

    /// Primitive-only attributes
    #[serde(default)]
    pub attributes: Attributes,
}

/// Ordered sequence of normalized records for one document
///
/// This is the unit written to the result log, one per line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Identifier of the annotated document the records came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Source text the extractions refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Records in order of appearance
    #[serde(default)]
    pub extractions: Vec<ExtractionRecord>,
}

impl ExtractionResult {
    /// Number of records
    pub fn len(&self) -> usize {
        self.extractions.len()
    }

    /// Whether the result holds no records
    pub fn is_empty(&self) -> bool {
        self.extractions.is_empty()
    }
}
