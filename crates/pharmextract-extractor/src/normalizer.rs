//! Flattening of gateway results into JSON-safe records
//!
//! The same functions serve the predict path (fresh documents) and the read
//! path (stored lines), so both always produce the same shape.

use pharmextract_domain::{AnnotatedDocument, Attributes, Extraction, ExtractionRecord, ExtractionResult};
use serde_json::Value;
use tracing::warn;

/// Normalize a fresh annotated document
///
/// One record per extraction, in order. Category and text are copied
/// verbatim; attribute values that are not primitives become their compact
/// JSON text.
pub fn normalize(doc: &AnnotatedDocument) -> ExtractionResult {
    ExtractionResult {
        document_id: Some(doc.document_id.clone()),
        text: Some(doc.text.clone()),
        extractions: doc.extractions.iter().map(normalize_record).collect(),
    }
}

/// Normalize a single extraction
pub fn normalize_record(extraction: &Extraction) -> ExtractionRecord {
    let mut attributes = Attributes::new();
    if let Some(map) = &extraction.attributes {
        for (key, value) in map {
            attributes.insert_coerced(key.clone(), value);
        }
    }

    ExtractionRecord {
        category: extraction.extraction_class.clone(),
        text: extraction.extraction_text.clone(),
        attributes,
    }
}

/// Normalize a stored JSON record
///
/// A value without an `extractions` array yields an empty result. Entries
/// are read with the same leniency as model output, so an entry with
/// malformed attributes keeps its category and text; entries without them
/// are skipped. Neither case is fatal.
pub fn normalize_value(value: &Value) -> ExtractionResult {
    let Some(object) = value.as_object() else {
        warn!("Stored record is not a JSON object; returning no extractions");
        return ExtractionResult::default();
    };

    let string_field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    let mut result = ExtractionResult {
        document_id: string_field("document_id"),
        text: string_field("text"),
        extractions: Vec::new(),
    };

    let Some(entries) = object.get("extractions").and_then(Value::as_array) else {
        warn!("Stored record has no extractions array; returning no extractions");
        return result;
    };

    for (idx, entry) in entries.iter().enumerate() {
        match Extraction::from_json(entry) {
            Ok(extraction) => result.extractions.push(normalize_record(&extraction)),
            Err(e) => warn!("Skipping stored extraction {}: {}", idx, e),
        }
    }

    result
}
