//! Annotated documents as produced by the extraction gateway

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A single extraction returned by the remote extractor
///
/// Attribute values are arbitrary JSON; the model is free to return nested
/// objects or arrays. Flattening happens later, in the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Semantic class of the span (e.g. "analysis_body")
    #[serde(alias = "category")]
    pub extraction_class: String,

    /// Verbatim text of the span
    #[serde(alias = "text")]
    pub extraction_text: String,

    /// Key/value attributes in the order the model emitted them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

impl Extraction {
    /// Create an extraction without attributes
    pub fn new(extraction_class: impl Into<String>, extraction_text: impl Into<String>) -> Self {
        Self {
            extraction_class: extraction_class.into(),
            extraction_text: extraction_text.into(),
            attributes: None,
        }
    }

    /// Attach one attribute, preserving insertion order
    ///
    /// # Examples
    ///
    /// ```
    /// use pharmextract_domain::Extraction;
    ///
    /// let extraction = Extraction::new("financial_entity", "JPMorgan Chase")
    ///     .with_attribute("type", "bank");
    /// assert_eq!(extraction.attributes.unwrap()["type"], "bank");
    /// ```
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Read one extraction entry from loosely shaped JSON
    ///
    /// Two shapes are understood: the explicit
    /// `{"extraction_class": .., "extraction_text": .., "attributes": {..}}`
    /// (or `category`/`text`), and the compact `{"<class>": "<text>",
    /// "<class>_attributes": {..}}`. When both a long and a short name are
    /// present the long one wins. Attributes that are not an object are
    /// dropped; the entry itself is kept.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "Extraction is not a JSON object".to_string())?;

        let class = obj.get("extraction_class").or_else(|| obj.get("category"));
        let text = obj.get("extraction_text").or_else(|| obj.get("text"));

        let (extraction_class, extraction_text, attributes) = match (class, text) {
            (Some(class), Some(text)) => (
                scalar_text(class).ok_or("Invalid 'extraction_class'")?,
                scalar_text(text).ok_or("Invalid 'extraction_text'")?,
                obj.get("attributes"),
            ),
            (None, None) => parse_compact(obj)?,
            (None, Some(_)) => return Err("Missing 'extraction_class'".to_string()),
            (Some(_), None) => return Err("Missing 'extraction_text'".to_string()),
        };

        let attributes = match attributes {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => {
                warn!(
                    "Ignoring non-object attributes for '{}': {}",
                    extraction_class, other
                );
                None
            }
        };

        Ok(Self {
            extraction_class,
            extraction_text,
            attributes,
        })
    }
}

fn parse_compact(obj: &Map<String, Value>) -> Result<(String, String, Option<&Value>), String> {
    let mut keys = obj.keys().filter(|k| !k.ends_with("_attributes"));
    let class = match (keys.next(), keys.next()) {
        (Some(class), None) => class,
        _ => return Err("Missing 'extraction_class' and 'extraction_text'".to_string()),
    };
    let text = obj
        .get(class)
        .and_then(scalar_text)
        .ok_or_else(|| format!("Invalid text for '{}'", class))?;
    let attributes = obj.get(&format!("{}_attributes", class));
    Ok((class.clone(), text, attributes))
}

/// Strings are taken as-is; numbers are rendered, since models sometimes
/// return a bare value for numeric spans
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The gateway's response: source text bundled with its extractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Identifier of the document
    #[serde(default = "generate_document_id")]
    pub document_id: String,

    /// The submitted source text
    #[serde(default)]
    pub text: String,

    /// Extractions in order of appearance
    #[serde(default)]
    pub extractions: Vec<Extraction>,
}

impl AnnotatedDocument {
    /// Create a document with a freshly generated identifier
    pub fn new(text: impl Into<String>, extractions: Vec<Extraction>) -> Self {
        Self {
            document_id: generate_document_id(),
            text: text.into(),
            extractions,
        }
    }
}

/// Generate a document identifier of the form `doc_<uuid-v7-hex>`
///
/// UUIDv7 ids sort by creation time, which keeps ids in a result log roughly
/// chronological.
pub fn generate_document_id() -> String {
    format!("doc_{}", uuid::Uuid::now_v7().simple())
}

/// A worked few-shot example: input text plus the expected extractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleData {
    /// Example input text
    pub text: String,

    /// Expected extractions for the input
    pub extractions: Vec<Extraction>,
}

impl ExampleData {
    /// Create an example
    pub fn new(text: impl Into<String>, extractions: Vec<Extraction>) -> Self {
        Self {
            text: text.into(),
            extractions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_document_id();
        let b = generate_document_id();
        assert!(a.starts_with("doc_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_extraction_accepts_short_field_names() {
        let extraction: Extraction = serde_json::from_value(json!({
            "category": "analysis_body",
            "text": "Myalgia was reported in 8.2% of patients.",
            "attributes": {"clinical_significance": "minor"}
        }))
        .unwrap();

        assert_eq!(extraction.extraction_class, "analysis_body");
        assert_eq!(extraction.extraction_text, "Myalgia was reported in 8.2% of patients.");
        assert_eq!(
            extraction.attributes.unwrap()["clinical_significance"],
            "minor"
        );
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let extraction = Extraction::new("analysis_body", "x")
            .with_attribute("section", "Safety Profile")
            .with_attribute("clinical_significance", "significant")
            .with_attribute("evidence_quality", "strong");

        let keys: Vec<_> = extraction.attributes.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["section", "clinical_significance", "evidence_quality"]);
    }

    #[test]
    fn test_from_json_numeric_text_is_rendered() {
        let extraction =
            Extraction::from_json(&json!({"extraction_class": "dose_mg", "extraction_text": 200}))
                .unwrap();
        assert_eq!(extraction.extraction_text, "200");
    }

    #[test]
    fn test_from_json_long_and_short_names_together() {
        let extraction = Extraction::from_json(&json!({
            "extraction_class": "medication",
            "extraction_text": "Drug LMN",
            "text": "ignored",
            "category": "ignored"
        }))
        .unwrap();
        assert_eq!(extraction.extraction_class, "medication");
        assert_eq!(extraction.extraction_text, "Drug LMN");

        // serde rejects the same entry as a duplicate field
        assert!(serde_json::from_value::<Extraction>(json!({
            "extraction_text": "Drug LMN",
            "text": "ignored",
            "extraction_class": "medication"
        }))
        .is_err());
    }

    #[test]
    fn test_from_json_drops_non_object_attributes_only() {
        for attributes in [json!(["x", 1]), json!("note"), json!(3)] {
            let extraction = Extraction::from_json(&json!({
                "category": "event",
                "text": "Severe rash",
                "attributes": attributes
            }))
            .unwrap();
            assert_eq!(extraction.extraction_text, "Severe rash");
            assert!(extraction.attributes.is_none());
        }
    }

    #[test]
    fn test_from_json_compact_shape_and_rejects() {
        let extraction = Extraction::from_json(&json!({
            "medication": "Atorvastatin 40mg",
            "medication_attributes": {"route": "oral"}
        }))
        .unwrap();
        assert_eq!(extraction.extraction_class, "medication");
        assert_eq!(extraction.attributes.unwrap()["route"], "oral");

        assert!(Extraction::from_json(&json!(42)).is_err());
        assert!(Extraction::from_json(&json!({"extraction_class": "party"})).is_err());
        assert!(Extraction::from_json(&json!({"a": "x", "b": "y"})).is_err());
    }

    #[test]
    fn test_document_defaults() {
        let doc: AnnotatedDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.document_id.starts_with("doc_"));
        assert!(doc.text.is_empty());
        assert!(doc.extractions.is_empty());
    }
}
