//! Few-shot prompt rendering for the extraction call

use pharmextract_domain::{ExampleData, Extraction};
use serde_json::{json, Value};

/// Builds the single text prompt sent to the model
pub struct PromptBuilder<'a> {
    description: &'a str,
    examples: &'a [ExampleData],
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for one document
    pub fn new(description: &'a str, examples: &'a [ExampleData], text: &'a str) -> Self {
        Self {
            description,
            examples,
            text,
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task description
        prompt.push_str(self.description.trim_end());
        prompt.push_str("\n\n");

        // 2. Output contract
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\n");

        // 3. Worked examples as question/answer pairs
        if !self.examples.is_empty() {
            prompt.push_str("Examples\n\n");
            for example in self.examples {
                prompt.push_str("Q: ");
                prompt.push_str(&example.text);
                prompt.push_str("\nA: ");
                prompt.push_str(&format!("{:#}", render_extractions(&example.extractions)));
                prompt.push_str("\n\n");
            }
        }

        // 4. The document to annotate
        prompt.push_str("Q: ");
        prompt.push_str(self.text);
        prompt.push_str("\nA: ");

        prompt
    }
}

/// Render extractions in the exact JSON shape the model must answer with
pub fn render_extractions(extractions: &[Extraction]) -> Value {
    let items: Vec<Value> = extractions
        .iter()
        .map(|e| {
            json!({
                "extraction_class": e.extraction_class,
                "extraction_text": e.extraction_text,
                "attributes": e.attributes.clone().unwrap_or_default(),
            })
        })
        .collect();
    json!({ "extractions": items })
}

const OUTPUT_FORMAT: &str = r#"Answer with JSON only, no additional text, shaped as:
{"extractions": [{"extraction_class": "...", "extraction_text": "...", "attributes": {}}]}
List extractions in order of appearance. extraction_text must be copied exactly from the input."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_sections_in_order() {
        let examples = vec![ExampleData::new(
            "JPMorgan Chase announces a strong quarter.",
            vec![Extraction::new("financial_entity", "JPMorgan Chase").with_attribute("type", "bank")],
        )];
        let prompt = PromptBuilder::new(
            "Extract financial entities.",
            &examples,
            "Tesla stock plummets.",
        )
        .build();

        let description = prompt.find("Extract financial entities.").unwrap();
        let example = prompt.find("Q: JPMorgan Chase").unwrap();
        let input = prompt.find("Q: Tesla stock plummets.").unwrap();
        assert!(description < example && example < input);
        assert!(prompt.contains(r#""extraction_class": "financial_entity""#));
        assert!(prompt.ends_with("A: "));
    }

    #[test]
    fn test_prompt_without_examples() {
        let prompt = PromptBuilder::new("Describe.", &[], "text").build();
        assert!(!prompt.contains("Examples"));
        assert!(prompt.contains("Q: text"));
    }

    #[test]
    fn test_render_empty_attributes_as_object() {
        let rendered = render_extractions(&[Extraction::new("regulatory_footer", "NDA 20-702")]);
        assert_eq!(rendered["extractions"][0]["attributes"], json!({}));
    }
}
