//! Clinical reports: adverse events and case summaries
//!
//! Shares the pharmaceutical section layout, so only the examples differ.

use super::extraction;
use pharmextract_domain::ExampleData;

pub(super) fn examples() -> Vec<ExampleData> {
    vec![
        ExampleData::new(
            "REPORT TYPE: Adverse Event\n\
             PATIENT: 54-year-old female\n\
             DRUG: Drug LMN\n\
             EVENT: Severe rash and pruritus after 3 days of therapy. \
             Symptoms resolved within 5 days of discontinuation.\n\
             \n\
             RECOMMENDATION:\n\
             Discontinue Drug LMN and avoid re-challenge.\n\
             \n\
             Reported to the national pharmacovigilance database under reference AE-2024-7781.",
            vec![
                extraction(
                    "report_header",
                    "REPORT TYPE: Adverse Event",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "report_header",
                    "PATIENT: 54-year-old female",
                    &[("section", "Study Design")],
                ),
                extraction(
                    "report_header",
                    "DRUG: Drug LMN",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "analysis_body",
                    "Severe rash and pruritus after 3 days of therapy.",
                    &[
                        ("section", "Adverse Events"),
                        ("clinical_significance", "significant"),
                        ("safety_level", "warning"),
                        ("evidence_quality", "preliminary"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Symptoms resolved within 5 days of discontinuation.",
                    &[
                        ("section", "Adverse Events"),
                        ("clinical_significance", "minor"),
                        ("evidence_quality", "preliminary"),
                    ],
                ),
                extraction(
                    "recommendations_section",
                    "Discontinue Drug LMN and avoid re-challenge.",
                    &[("section", "Warnings"), ("safety_level", "contraindication")],
                ),
                extraction(
                    "regulatory_footer",
                    "Reported to the national pharmacovigilance database under reference AE-2024-7781.",
                    &[("regulatory_impact", "medium")],
                ),
            ],
        ),
        ExampleData::new(
            "Patient was started on metformin 500mg twice daily for newly diagnosed type 2 diabetes. \
             HbA1c decreased from 8.4% to 7.1% over 12 weeks. \
             Mild gastrointestinal upset was reported during the first two weeks.\n\
             \n\
             Continue current dose and recheck HbA1c in 3 months.",
            vec![
                extraction(
                    "analysis_body",
                    "Patient was started on metformin 500mg twice daily for newly diagnosed type 2 diabetes.",
                    &[
                        ("section", "Clinical Observations"),
                        ("clinical_significance", "not_applicable"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "HbA1c decreased from 8.4% to 7.1% over 12 weeks.",
                    &[
                        ("section", "Efficacy Analysis"),
                        ("clinical_significance", "significant"),
                        ("evidence_quality", "moderate"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Mild gastrointestinal upset was reported during the first two weeks.",
                    &[
                        ("section", "Safety Profile"),
                        ("clinical_significance", "minor"),
                        ("safety_level", "routine"),
                    ],
                ),
                extraction(
                    "recommendations_section",
                    "Continue current dose and recheck HbA1c in 3 months.",
                    &[("section", "Monitoring"), ("safety_level", "routine")],
                ),
            ],
        ),
    ]
}
