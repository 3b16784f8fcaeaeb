//! Pharmaceutical report structuring: header, analysis, recommendations, footer

use super::extraction;
use pharmextract_domain::ExampleData;

pub(super) const PROMPT: &str = r#"# PharmExtract

You are a pharmaceutical specialist assistant. Categorize the report text into structured sections:

- report_header: study identification, protocol numbers, regulatory references, investigator and approval details that precede the clinical analysis.
- analysis_body: efficacy results, safety and tolerability data, pharmacokinetic and pharmacodynamic parameters, adverse event profiles, clinical observations.
- recommendations_section: dosing and administration guidance, indications, contraindications, warnings, monitoring recommendations.
- regulatory_footer: approval status, approval numbers, compliance statements, disclaimers, distribution restrictions.

Rules:
- Extract text exactly as written, in order of appearance. Do not paraphrase or overlap extractions.
- Only create extractions for sections that exist. A report that starts directly with clinical data has no report_header.
- Clinical findings are never header content.
- Split header blocks into one extraction per line and label each with a "section" attribute: "Protocol Summary", "Regulatory Status", "Study Design", "Investigator Information" or "Approval Information".
- Do not include headings such as "DOSING RECOMMENDATIONS:" in recommendations_section text; extract only the content after the heading.
- When one sentence reports several endpoints, create one extraction per endpoint.
- Preserve statistical values, confidence intervals, units, drug names, dosages and regulatory reference numbers exactly.
- Label analysis_body extractions with a "section" such as "Efficacy Analysis", "Safety Profile", "Pharmacokinetics" or "Adverse Events".

Attributes:
- clinical_significance (required for analysis_body): "normal", "minor", "significant", "critical" or "not_applicable".
- regulatory_impact: "low", "medium", "high" or "critical".
- safety_level: "routine", "caution", "warning" or "contraindication", for safety-related findings.
- evidence_quality: "preliminary", "moderate", "strong" or "definitive"."#;

pub(super) fn examples() -> Vec<ExampleData> {
    vec![
        ExampleData::new(
            "PROTOCOL NUMBER: ONCO-2024-157\n\
             STUDY TITLE: Phase III Randomized Trial of Novel Oncology Agent XK-429\n\
             PRINCIPAL INVESTIGATOR: Dr. Sarah Chen, MD, PhD\n\
             REGULATORY STATUS: FDA IND 123456, EMA CTA 2024-001234-15\n\
             IRB APPROVAL: Western University IRB #2024-0892, Approved March 15, 2024\n\
             \n\
             EFFICACY ANALYSIS:\n\
             The primary endpoint of overall survival was met with statistical significance (HR=0.68, 95% CI: 0.52-0.89, p=0.005). \
             Median overall survival was 24.3 months in the treatment arm versus 16.8 months in the control arm.\n\
             \n\
             SAFETY PROFILE:\n\
             Grade 3-4 adverse events were reported in 42% of treatment group versus 31% in control group.\n\
             \n\
             DOSING RECOMMENDATIONS:\n\
             Recommended Phase III dose is 200mg twice daily with food. Dose reduction to 150mg twice daily for Grade 2 toxicities.\n\
             \n\
             REGULATORY COMPLIANCE:\n\
             This study was conducted in accordance with GCP guidelines and FDA 21 CFR Part 312.",
            vec![
                extraction(
                    "report_header",
                    "PROTOCOL NUMBER: ONCO-2024-157",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "report_header",
                    "STUDY TITLE: Phase III Randomized Trial of Novel Oncology Agent XK-429",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "report_header",
                    "PRINCIPAL INVESTIGATOR: Dr. Sarah Chen, MD, PhD",
                    &[("section", "Investigator Information")],
                ),
                extraction(
                    "report_header",
                    "REGULATORY STATUS: FDA IND 123456, EMA CTA 2024-001234-15",
                    &[("section", "Regulatory Status")],
                ),
                extraction(
                    "report_header",
                    "IRB APPROVAL: Western University IRB #2024-0892, Approved March 15, 2024",
                    &[("section", "Approval Information")],
                ),
                extraction(
                    "analysis_body",
                    "The primary endpoint of overall survival was met with statistical significance (HR=0.68, 95% CI: 0.52-0.89, p=0.005).",
                    &[
                        ("section", "Efficacy Analysis"),
                        ("clinical_significance", "significant"),
                        ("regulatory_impact", "high"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Median overall survival was 24.3 months in the treatment arm versus 16.8 months in the control arm.",
                    &[
                        ("section", "Efficacy Analysis"),
                        ("clinical_significance", "significant"),
                        ("regulatory_impact", "high"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Grade 3-4 adverse events were reported in 42% of treatment group versus 31% in control group.",
                    &[
                        ("section", "Safety Profile"),
                        ("clinical_significance", "significant"),
                        ("regulatory_impact", "high"),
                        ("safety_level", "warning"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "recommendations_section",
                    "Recommended Phase III dose is 200mg twice daily with food.",
                    &[("section", "Dosing"), ("safety_level", "routine")],
                ),
                extraction(
                    "recommendations_section",
                    "Dose reduction to 150mg twice daily for Grade 2 toxicities.",
                    &[("section", "Dosing"), ("safety_level", "caution")],
                ),
                extraction(
                    "regulatory_footer",
                    "This study was conducted in accordance with GCP guidelines and FDA 21 CFR Part 312.",
                    &[],
                ),
            ],
        ),
        ExampleData::new(
            "STUDY ID: CV-STATIN-2024\n\
             COMPOUND: Atorvastatin 40mg\n\
             STUDY DESIGN: Randomized, double-blind, placebo-controlled\n\
             \n\
             PHARMACOKINETIC PARAMETERS:\n\
             Cmax was 42.3 ± 8.7 ng/mL achieved at Tmax of 2.1 ± 0.8 hours. Half-life was determined to be 14.2 ± 3.1 hours.\n\
             \n\
             ADVERSE EVENTS:\n\
             Myalgia was reported in 8.2% of patients. Liver enzyme elevation >3x ULN occurred in 1.1% of patients.\n\
             \n\
             CONTRAINDICATIONS:\n\
             Active liver disease or unexplained persistent liver enzyme elevations.\n\
             \n\
             FDA APPROVAL STATUS: NDA 20-702, Approved December 17, 1996",
            vec![
                extraction(
                    "report_header",
                    "STUDY ID: CV-STATIN-2024",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "report_header",
                    "COMPOUND: Atorvastatin 40mg",
                    &[("section", "Protocol Summary")],
                ),
                extraction(
                    "report_header",
                    "STUDY DESIGN: Randomized, double-blind, placebo-controlled",
                    &[("section", "Study Design")],
                ),
                extraction(
                    "analysis_body",
                    "Cmax was 42.3 ± 8.7 ng/mL achieved at Tmax of 2.1 ± 0.8 hours.",
                    &[
                        ("section", "Pharmacokinetics"),
                        ("clinical_significance", "normal"),
                        ("regulatory_impact", "medium"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Half-life was determined to be 14.2 ± 3.1 hours.",
                    &[
                        ("section", "Pharmacokinetics"),
                        ("clinical_significance", "normal"),
                        ("regulatory_impact", "medium"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Myalgia was reported in 8.2% of patients.",
                    &[
                        ("section", "Adverse Events"),
                        ("clinical_significance", "minor"),
                        ("safety_level", "caution"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "analysis_body",
                    "Liver enzyme elevation >3x ULN occurred in 1.1% of patients.",
                    &[
                        ("section", "Adverse Events"),
                        ("clinical_significance", "significant"),
                        ("regulatory_impact", "high"),
                        ("safety_level", "warning"),
                        ("evidence_quality", "strong"),
                    ],
                ),
                extraction(
                    "recommendations_section",
                    "Active liver disease or unexplained persistent liver enzyme elevations.",
                    &[("section", "Contraindications"), ("safety_level", "contraindication")],
                ),
                extraction(
                    "regulatory_footer",
                    "FDA APPROVAL STATUS: NDA 20-702, Approved December 17, 1996",
                    &[],
                ),
            ],
        ),
    ]
}
