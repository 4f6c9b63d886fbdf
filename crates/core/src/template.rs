//! Markdown skeletons for generated project overviews.
//!
//! Each template carries the placeholders `{projectTitle}`, `{description}`
//! and `{date}`; the model fills them, and [`render`] fills them locally.

use chrono::NaiveDate;

use crate::prompt::Category;

pub const TITLE_PLACEHOLDER: &str = "{projectTitle}";
pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";
pub const DATE_PLACEHOLDER: &str = "{date}";

const FOOTER: &str = "---\n\n*Generated collaboratively on {date}. This is a living document.*";

/// Build a template from its section list: `(heading, bullets)`.
fn assemble(sections: &[(&str, [&str; 3])]) -> String {
    let mut out = String::from("# {projectTitle}\n\n## Concept Overview\n{description}\n\n");
    for (heading, bullets) in sections {
        out.push_str("## ");
        out.push_str(heading);
        out.push('\n');
        for bullet in bullets {
            out.push_str("- ");
            out.push_str(bullet);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

impl Category {
    /// The markdown template for this category.
    pub fn document_template(&self) -> String {
        let sections: &[(&str, [&str; 3])] = match self {
            Self::Technology => &[
                ("Technical Architecture", [
                    "Platform and technology stack",
                    "System components and integrations",
                    "Scalability and performance",
                ]),
                ("User Experience", [
                    "Core user workflows",
                    "Interface design and interactions",
                    "Key features along the user journey",
                ]),
                ("Development Roadmap", [
                    "Phase 1: core functionality",
                    "Phase 2: advanced features",
                    "Phase 3: optimisation and scaling",
                ]),
                ("Technical Requirements", [
                    "Tools and frameworks",
                    "Infrastructure and hosting",
                    "Security and compliance",
                ]),
                ("Success Metrics", [
                    "Adoption and engagement",
                    "Performance and reliability",
                    "Maintainability",
                ]),
            ],
            Self::Business => &[
                ("Market Opportunity", [
                    "Target market and audience",
                    "Market size and growth potential",
                    "Competitive landscape",
                ]),
                ("Business Model", [
                    "Revenue streams and pricing",
                    "Value proposition and differentiation",
                    "Customer acquisition",
                ]),
                ("Financial Outlook", [
                    "Revenue projections",
                    "Cost structure and profitability",
                    "Funding needs and timeline",
                ]),
                ("Growth Strategy", [
                    "Market expansion",
                    "Partnerships",
                    "Operational scaling",
                ]),
                ("Success Metrics", [
                    "Revenue and profitability targets",
                    "Customer acquisition and retention",
                    "Competitive position",
                ]),
            ],
            Self::Creative => &[
                ("Creative Vision", [
                    "Artistic direction and aesthetic",
                    "Emotional impact and storytelling",
                    "Process and inspiration",
                ]),
                ("Audience Experience", [
                    "How the audience will feel and engage",
                    "Visual and sensory elements",
                    "Narrative approach",
                ]),
                ("Creative Elements", [
                    "Design philosophy and choices",
                    "Influences and references",
                    "What makes it distinct",
                ]),
                ("Production Approach", [
                    "Workflow and process",
                    "Resources and collaborators",
                    "Creative milestones",
                ]),
                ("Success Metrics", [
                    "Audience response",
                    "Creative impact and recognition",
                    "Artistic growth",
                ]),
            ],
            Self::Health => &[
                ("Health Impact", [
                    "Outcomes and benefits for users",
                    "Evidence behind the approach",
                    "Safety and regulatory considerations",
                ]),
                ("Target Users", [
                    "Health needs and pain points",
                    "Accessibility and inclusivity",
                    "Motivation and behaviour",
                ]),
                ("Implementation Strategy", [
                    "Intervention approach",
                    "Engagement and retention",
                    "Progress tracking",
                ]),
                ("Health Outcomes", [
                    "Specific improvements",
                    "Measurement and evaluation",
                    "Long-term impact",
                ]),
                ("Success Metrics", [
                    "Outcome improvements",
                    "Engagement and adherence",
                    "Wellness impact",
                ]),
            ],
            Self::Education => &[
                ("Learning Objectives", [
                    "Knowledge and skills to be gained",
                    "Learning outcomes",
                    "Competencies to develop",
                ]),
                ("Target Learners", [
                    "Who the learners are",
                    "Learning styles and preferences",
                    "Accessibility needs",
                ]),
                ("Teaching Methodology", [
                    "Pedagogical approach",
                    "Content structure and delivery",
                    "Interactive elements",
                ]),
                ("Assessment", [
                    "Measuring progress",
                    "Feedback loops",
                    "Completion criteria",
                ]),
                ("Success Metrics", [
                    "Learning outcomes achieved",
                    "Engagement and completion",
                    "Real-world application",
                ]),
            ],
            Self::Social => &[
                ("Social Impact", [
                    "Community need being addressed",
                    "Expected change",
                    "Who benefits",
                ]),
                ("Stakeholders", [
                    "Community members",
                    "Partners and allies",
                    "Supporters and funders",
                ]),
                ("Implementation Strategy", [
                    "Community engagement",
                    "Partnerships and collaboration",
                    "Sustainability",
                ]),
                ("Measuring Impact", [
                    "Outcome indicators",
                    "Data collection",
                    "Reporting to stakeholders",
                ]),
                ("Success Metrics", [
                    "Measurable social outcomes",
                    "Community participation",
                    "Long-term change",
                ]),
            ],
            Self::General => &[
                ("Vision", [
                    "What the project aims to achieve",
                    "Why it matters",
                    "What makes it unique",
                ]),
                ("Target Audience", [
                    "Who it is for",
                    "Their needs",
                    "How they benefit",
                ]),
                ("Implementation", [
                    "Key steps",
                    "Resources needed",
                    "Timeline",
                ]),
                ("Challenges and Opportunities", [
                    "Known risks",
                    "Open questions",
                    "Room to grow",
                ]),
                ("Success Metrics", [
                    "Goals",
                    "Milestones",
                    "How progress is measured",
                ]),
            ],
        };
        assemble(sections)
    }
}

/// Replace every placeholder in `template`.
pub fn render(template: &str, title: &str, description: Option<&str>, date: NaiveDate) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(
            DESCRIPTION_PLACEHOLDER,
            description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("No description provided"),
        )
        .replace(DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_carries_all_placeholders() {
        for category in Category::ALL {
            let template = category.document_template();
            assert!(template.starts_with("# {projectTitle}"), "{category}");
            assert!(template.contains(DESCRIPTION_PLACEHOLDER), "{category}");
            assert!(template.contains(DATE_PLACEHOLDER), "{category}");
            assert!(template.contains("## Success Metrics"), "{category}");
        }
    }

    #[test]
    fn templates_differ_by_category() {
        assert!(Category::Technology
            .document_template()
            .contains("## Technical Architecture"));
        assert!(Category::Business
            .document_template()
            .contains("## Business Model"));
        assert_ne!(
            Category::Health.document_template(),
            Category::General.document_template()
        );
    }

    #[test]
    fn render_fills_placeholders() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let out = render(
            &Category::General.document_template(),
            "Seed Swap",
            Some("Trade seeds"),
            date,
        );

        assert!(out.starts_with("# Seed Swap\n"));
        assert!(out.contains("Trade seeds"));
        assert!(out.contains("on 2024-03-09."));
        assert!(!out.contains('{'));
    }

    #[test]
    fn render_uses_placeholder_for_missing_description() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let out = render("{description}", "T", Some("  "), date);
        assert_eq!(out, "No description provided");
    }
}
