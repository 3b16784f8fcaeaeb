use super::extraction;
use pharmextract_domain::ExampleData;

pub(super) const PROMPT: &str = "Extract contract parties, obligations, dates, monetary amounts and governing-law clauses \
in order of appearance. Use exact text for extractions. Do not paraphrase or overlap entities. \
Label each party with its role, each obligation with the obligated party, and each date with what it governs.";

pub(super) fn examples() -> Vec<ExampleData> {
    vec![ExampleData::new(
        "This Supply Agreement is entered into on January 5, 2024 between Acme Pharma Inc. (\"Supplier\") \
         and Northside Health LLC (\"Buyer\"). Supplier shall deliver 10,000 units per quarter. \
         Buyer shall pay $250,000 within 30 days of each delivery. \
         This Agreement shall be governed by the laws of the State of Delaware.",
        vec![
            extraction(
                "date",
                "January 5, 2024",
                &[("governs", "effective_date")],
            ),
            extraction("party", "Acme Pharma Inc.", &[("role", "Supplier")]),
            extraction("party", "Northside Health LLC", &[("role", "Buyer")]),
            extraction(
                "obligation",
                "Supplier shall deliver 10,000 units per quarter.",
                &[("obligated_party", "Supplier"), ("obligation_type", "delivery")],
            ),
            extraction(
                "monetary_amount",
                "$250,000",
                &[("currency", "USD"), ("payer", "Buyer")],
            ),
            extraction(
                "obligation",
                "within 30 days of each delivery",
                &[("obligated_party", "Buyer"), ("obligation_type", "payment_term")],
            ),
            extraction(
                "governing_law",
                "governed by the laws of the State of Delaware",
                &[("jurisdiction", "Delaware")],
            ),
        ],
    )]
}
