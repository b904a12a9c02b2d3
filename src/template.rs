//! Built-in written-submission master template.
//!
//! Hosts may supply their own template document (JSON over the [`crate::doc`]
//! model); this module provides the standard fixed-layout skeleton used
//! when none is given. Placeholders use `{{NAME}}` tokens; the feature
//! table anchors on its dedicated marker paragraph.

use crate::doc::Document;

/// Build the standard written-submission template.
pub fn master_template() -> Document {
    let mut doc = Document::new();

    doc.push_paragraph("{{WS_DATE}}");
    doc.push_paragraph("To,");
    doc.push_paragraph("{{CONTROLLER_NAME}}");
    doc.push_paragraph("Office of the Controller of Patents, {{CITY}}");
    doc.push_paragraph(
        "Sub: Written submission in respect of Indian Patent Application No. {{APP_NO}} \
         filed on {{FILED_ON}} in the name of {{APPLICANT_NAME}}",
    );
    doc.push_paragraph(
        "Ref: Hearing notice dated {{HN_DISPATCH_DATE}}; FER dated {{FER_DATE}}; \
         reply to FER dated {{FER_REPLY_DATE}}",
    );
    doc.push_paragraph("Dear {{DEAR_SALUTATION}},");

    doc.push_paragraph("STATEMENT REGARDING SUBSTANCE OF HEARING");
    doc.push_paragraph(
        "With reference to the hearing scheduled on {{HEARING_DATE_TIME}} to be held via \
         {{HEARING_MODE}}, the following participants attended:",
    );
    doc.push_paragraph("{{PARTICIPANTS}}");
    doc.push_paragraph("The hearing notice cites the following documents:");
    doc.push_paragraph("{{PRIOR_ARTS_LIST}}");

    doc.push_paragraph("REPLY TO OBJECTION");
    doc.push_paragraph("Novelty");
    doc.push_paragraph(
        "The objections based on {{DX_AND}} are addressed below with reference to claims \
         {{CLAIMS_RANGE}}.",
    );
    doc.push_paragraph("Regarding Claim 1:");
    doc.push_paragraph("{{AMENDED_CLAIM_1}}");
    doc.push_paragraph("{{FEATURE_TABLE}}");

    for n in 2..=10u32 {
        doc.push_paragraph(format!("Regarding Claim {n}:"));
        doc.push_paragraph(format!("{{{{AMENDED_CLAIM_{n}}}}}"));
    }
    doc.push_paragraph("{{EXTRA_CLAIMS_BLOCK}}");

    doc.push_paragraph("NON-PATENTABILITY U/S 3");
    doc.push_paragraph("{{REPLY_3K}}");

    doc.push_paragraph("Formal Requirements");
    doc.push_paragraph("{{FORMAL_OBJECTIONS_REPLY}}");

    doc.push_paragraph("TECHNICAL ADVANCEMENT");
    doc.push_paragraph("{{TECHNICAL_ADVANCEMENT}}");
    doc.push_paragraph("TECHNICAL PROBLEM SOLVED BY THE INVENTION");
    doc.push_paragraph("{{TECH_PROBLEM}}");
    doc.push_paragraph("TECHNICAL SOLUTION PROVIDED BY THE INVENTION");
    doc.push_paragraph("{{TECH_SOLUTION}}");
    doc.push_paragraph("{{TECH_SOLUTION_IMAGES}}");
    doc.push_paragraph("Technical Effect");
    doc.push_paragraph("{{TECH_EFFECT}}");

    doc.push_paragraph(
        "In view of the submissions above, the Applicant respectfully requests that the \
         application be found in order for grant.",
    );
    doc.push_paragraph("Yours faithfully");
    doc.push_paragraph("{{AGENT_NAMES}}");
    doc.push_paragraph("Enclosure");
    doc.push_paragraph("Marked-up and clean copies of the claims as on record.");

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_template_structure() {
        let doc = master_template();
        let text = doc.plain_text();

        assert!(text.contains("{{APP_NO}}"));
        assert!(text.contains("{{FEATURE_TABLE}}"));
        assert!(text.contains("{{TECH_SOLUTION_IMAGES}}"));
        for n in 2..=10 {
            assert!(text.contains(&format!("Regarding Claim {n}:")));
            assert!(text.contains(&format!("{{{{AMENDED_CLAIM_{n}}}}}")));
        }
    }

    #[test]
    fn test_master_template_roundtrips_through_json() {
        let doc = master_template();
        let bytes = doc.to_json_bytes().unwrap();
        let parsed = Document::from_json(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(parsed.len(), doc.len());
    }
}
