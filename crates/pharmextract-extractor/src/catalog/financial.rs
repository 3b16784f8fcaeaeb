use super::extraction;
use pharmextract_domain::ExampleData;

pub(super) const PROMPT: &str = "Extract financial entities, sentiments, and relationships in order of appearance. \
Use exact text for extractions. Do not paraphrase or overlap entities. \
Provide meaningful attributes for each entity to add context: entity type and ticker for organizations, \
direction and strength for sentiments, and the parties involved for relationships.";

pub(super) fn examples() -> Vec<ExampleData> {
    vec![ExampleData::new(
        "JPMorgan Chase reported record quarterly profits, driven by strong investment banking fees. \
         Analysts remain bullish on the stock. \
         The bank also announced a partnership with Stripe to expand payment services.",
        vec![
            extraction(
                "financial_entity",
                "JPMorgan Chase",
                &[("entity_type", "bank"), ("ticker", "JPM")],
            ),
            extraction(
                "sentiment",
                "record quarterly profits",
                &[("direction", "positive"), ("strength", "strong")],
            ),
            extraction(
                "financial_entity",
                "investment banking fees",
                &[("entity_type", "revenue_stream")],
            ),
            extraction(
                "sentiment",
                "Analysts remain bullish on the stock.",
                &[("direction", "positive"), ("source", "analysts")],
            ),
            extraction(
                "relationship",
                "partnership with Stripe",
                &[
                    ("relationship_type", "partnership"),
                    ("party_a", "JPMorgan Chase"),
                    ("party_b", "Stripe"),
                ],
            ),
            extraction(
                "financial_entity",
                "Stripe",
                &[("entity_type", "payments_company")],
            ),
        ],
    )]
}
