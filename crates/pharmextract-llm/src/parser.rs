//! Parse model output into extractions

use pharmextract_domain::{Extraction, GatewayError};
use serde_json::Value;
use tracing::warn;

/// Parse the model's JSON answer into extractions, in order
///
/// Accepts `{"extractions": [...]}` or a bare array, optionally wrapped in a
/// markdown code block. Individual malformed entries are skipped; an answer
/// that is not JSON at all is an error.
pub fn parse_model_output(output: &str) -> Result<Vec<Extraction>, GatewayError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(output)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| GatewayError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let items = match &json {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("extractions")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                GatewayError::InvalidResponse("Expected an \"extractions\" array".to_string())
            })?,
        _ => {
            return Err(GatewayError::InvalidResponse(
                "Expected a JSON object or array".to_string(),
            ))
        }
    };

    let mut extractions = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match Extraction::from_json(item) {
            Ok(extraction) => extractions.push(extraction),
            Err(e) => warn!("Skipping extraction {}: {}", idx, e),
        }
    }

    Ok(extractions)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, GatewayError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(GatewayError::InvalidResponse("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and the closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wrapped_object() {
        let output = r#"{"extractions": [
            {"extraction_class": "report_header", "extraction_text": "PROTOCOL: PSYCH-ANX-2024-089",
             "attributes": {"section": "Protocol Summary"}},
            {"extraction_class": "analysis_body", "extraction_text": "No accumulation observed.",
             "attributes": {"clinical_significance": "normal"}}
        ]}"#;

        let extractions = parse_model_output(output).unwrap();
        assert_eq!(extractions.len(), 2);
        assert_eq!(extractions[0].extraction_class, "report_header");
        assert_eq!(extractions[1].extraction_text, "No accumulation observed.");
        assert_eq!(
            extractions[0].attributes.as_ref().unwrap()["section"],
            "Protocol Summary"
        );
    }

    #[test]
    fn test_parse_bare_array_with_short_names() {
        let output = r#"[{"category": "analysis_body", "text": "Cmax was 42.3 ng/mL."}]"#;
        let extractions = parse_model_output(output).unwrap();
        assert_eq!(extractions.len(), 1);
        assert_eq!(extractions[0].extraction_class, "analysis_body");
        assert!(extractions[0].attributes.is_none());
    }

    #[test]
    fn test_parse_markdown_wrapper() {
        let output = "```json\n{\"extractions\": [{\"extraction_class\": \"sentiment\", \"extraction_text\": \"plummets\"}]}\n```";
        let extractions = parse_model_output(output).unwrap();
        assert_eq!(extractions[0].extraction_text, "plummets");
    }

    #[test]
    fn test_parse_compact_shape() {
        let output = r#"{"extractions": [
            {"medication": "Atorvastatin 40mg", "medication_attributes": {"route": "oral"}}
        ]}"#;
        let extractions = parse_model_output(output).unwrap();
        assert_eq!(extractions[0].extraction_class, "medication");
        assert_eq!(extractions[0].extraction_text, "Atorvastatin 40mg");
        assert_eq!(extractions[0].attributes.as_ref().unwrap()["route"], "oral");
    }

    #[test]
    fn test_skips_malformed_entries_keeps_order() {
        let output = r#"{"extractions": [
            {"extraction_class": "a", "extraction_text": "first"},
            {"extraction_class": "b"},
            "not an object",
            {"extraction_class": "c", "extraction_text": "third", "attributes": "oops"}
        ]}"#;
        let extractions = parse_model_output(output).unwrap();
        let texts: Vec<_> = extractions.iter().map(|e| e.extraction_text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third"]);
        assert!(extractions[1].attributes.is_none());
    }

    #[test]
    fn test_numeric_text_is_rendered() {
        let extractions =
            parse_model_output(r#"[{"extraction_class": "dose_mg", "extraction_text": 200}]"#).unwrap();
        assert_eq!(extractions[0].extraction_text, "200");
    }

    #[test]
    fn test_not_json_is_error() {
        assert!(matches!(
            parse_model_output("I could not find any entities."),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_object_without_extractions_is_error() {
        assert!(parse_model_output(r#"{"results": []}"#).is_err());
    }

    #[test]
    fn test_empty_extractions() {
        assert!(parse_model_output(r#"{"extractions": []}"#).unwrap().is_empty());
    }
}
