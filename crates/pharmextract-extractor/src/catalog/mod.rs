//! Prompt and few-shot example catalog, keyed by examples type
//!
//! Pure data: one task description and a list of worked examples per domain.
//! Sets are built once and shared for the life of the process.

mod financial;
mod legal;
mod medical;
mod pharmaceutical;

use pharmextract_domain::{ExampleData, ExamplesType, Extraction};
use std::sync::LazyLock;
use tracing::warn;

/// Task description plus worked examples for one domain
#[derive(Debug, Clone)]
pub struct ExampleSet {
    /// Domain this set belongs to
    pub examples_type: ExamplesType,

    /// Instructions sent ahead of the examples
    pub prompt_description: &'static str,

    /// Worked examples
    pub examples: Vec<ExampleData>,
}

static MEDICAL: LazyLock<ExampleSet> = LazyLock::new(|| ExampleSet {
    examples_type: ExamplesType::Medical,
    prompt_description: pharmaceutical::PROMPT,
    examples: medical::examples(),
});

static FINANCIAL: LazyLock<ExampleSet> = LazyLock::new(|| ExampleSet {
    examples_type: ExamplesType::Financial,
    prompt_description: financial::PROMPT,
    examples: financial::examples(),
});

static LEGAL: LazyLock<ExampleSet> = LazyLock::new(|| ExampleSet {
    examples_type: ExamplesType::Legal,
    prompt_description: legal::PROMPT,
    examples: legal::examples(),
});

static PHARMACEUTICAL: LazyLock<ExampleSet> = LazyLock::new(|| ExampleSet {
    examples_type: ExamplesType::Pharmaceutical,
    prompt_description: pharmaceutical::PROMPT,
    examples: pharmaceutical::examples(),
});

/// Get the example set for a domain
pub fn example_set(examples_type: ExamplesType) -> &'static ExampleSet {
    match examples_type {
        ExamplesType::Medical => LazyLock::force(&MEDICAL),
        ExamplesType::Financial => LazyLock::force(&FINANCIAL),
        ExamplesType::Legal => LazyLock::force(&LEGAL),
        ExamplesType::Pharmaceutical => LazyLock::force(&PHARMACEUTICAL),
    }
}

/// Resolve a requested domain key
///
/// Missing keys select `default`. Unknown keys also select `default`; the
/// fallback is logged so a misspelled key is visible to operators.
pub fn resolve_examples_type(requested: Option<&str>, default: ExamplesType) -> ExamplesType {
    match requested.map(str::trim).filter(|key| !key.is_empty()) {
        None => default,
        Some(key) => ExamplesType::parse(key).unwrap_or_else(|| {
            warn!(
                "Unknown examples_type '{}', falling back to '{}'",
                key, default
            );
            default
        }),
    }
}

/// Shorthand for an example extraction with string attributes
fn extraction(class: &str, text: &str, attributes: &[(&str, &str)]) -> Extraction {
    attributes
        .iter()
        .fold(Extraction::new(class, text), |e, (key, value)| {
            e.with_attribute(*key, *value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_has_examples() {
        for kind in ExamplesType::ALL {
            let set = example_set(kind);
            assert_eq!(set.examples_type, kind);
            assert!(!set.prompt_description.is_empty());
            assert!(!set.examples.is_empty(), "{} has no examples", kind);
        }
    }

    #[test]
    fn test_example_extractions_are_verbatim() {
        for kind in ExamplesType::ALL {
            for example in &example_set(kind).examples {
                for e in &example.extractions {
                    assert!(
                        example.text.contains(&e.extraction_text),
                        "{}: '{}' not found in example text",
                        kind,
                        e.extraction_text
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_examples_type() {
        let default = ExamplesType::Medical;
        assert_eq!(resolve_examples_type(None, default), ExamplesType::Medical);
        assert_eq!(resolve_examples_type(Some(""), default), ExamplesType::Medical);
        assert_eq!(resolve_examples_type(Some("legal"), default), ExamplesType::Legal);
        assert_eq!(resolve_examples_type(Some("Financial"), default), ExamplesType::Financial);
        assert_eq!(resolve_examples_type(Some("astrology"), default), ExamplesType::Medical);
        assert_eq!(
            resolve_examples_type(Some("astrology"), ExamplesType::Pharmaceutical),
            ExamplesType::Pharmaceutical
        );
    }

    #[test]
    fn test_extraction_helper_keeps_attribute_order() {
        let e = extraction("analysis_body", "x", &[("section", "A"), ("evidence_quality", "strong")]);
        let keys: Vec<_> = e.attributes.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["section", "evidence_quality"]);
    }
}
