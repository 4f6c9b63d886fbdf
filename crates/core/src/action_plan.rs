//! Action-plan goals, the prompt that turns them into a checklist, and the
//! locally generated plan used when no model is available.

use serde::{Deserialize, Serialize};

use crate::chat::{DocumentContext, IdeaContext};
use crate::error::CoreError;
use crate::validation::{require_non_blank, validate_priority, DEFAULT_PRIORITY};

/// Characters of each document quoted in the fallback plan.
const INSIGHT_CHARS: usize = 150;

/// What the user wants from the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanGoals {
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub resources: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl ActionPlanGoals {
    /// Timeline and vision are required; priority must be in range.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank(Some(self.timeline.as_str()), "Timeline is required")?;
        require_non_blank(Some(self.vision.as_str()), "Vision is required")?;
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(())
    }

    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    fn resources_or(&self, fallback: &'static str) -> String {
        non_blank(self.resources.as_deref()).unwrap_or(fallback).to_string()
    }

    fn constraints_or(&self, fallback: &'static str) -> String {
        non_blank(self.constraints.as_deref()).unwrap_or(fallback).to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Title given to every generated plan.
pub fn plan_title(idea_title: &str) -> String {
    format!("Action Plan for {idea_title}")
}

/// Prompt asking the model for a concrete markdown checklist.
pub fn action_plan_prompt(
    idea: &IdeaContext,
    documents: &[DocumentContext],
    goals: &ActionPlanGoals,
) -> String {
    let research = documents
        .iter()
        .map(|doc| format!("{}:\n{}", doc.title, doc.content.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n\n");
    let research = if research.is_empty() {
        "No research documents available".to_string()
    } else {
        research
    };

    format!(
        "Create a specific, actionable plan for this idea. Avoid generic business advice: \
         derive tasks from the features, technical requirements and business model described \
         in the research.\n\n\
         IDEA: {title}\n\
         DESCRIPTION: {description}\n\
         CATEGORY: {category}\n\
         CONTENT: {content}\n\n\
         RESEARCH DOCUMENTS:\n{research}\n\n\
         USER GOALS:\n\
         - Timeline: {timeline}\n\
         - Vision: {vision}\n\
         - Resources: {resources}\n\
         - Constraints: {constraints}\n\
         - Priority: {priority}/10\n\n\
         Organise the plan into phases with week ranges that fit the timeline. Under each phase \
         list tasks as a markdown checklist (`- [ ] task`). Cover technical implementation, \
         feature development, validation with users, and launch. Finish with success metrics, \
         next immediate actions and risk mitigation that addresses the constraints. Each task \
         should be concrete enough to start on immediately.",
        title = idea.title,
        description = non_blank(idea.description.as_deref()).unwrap_or("No description provided"),
        category = non_blank(idea.category.as_deref()).unwrap_or("General"),
        content = non_blank(idea.content.as_deref()).unwrap_or("No additional content"),
        timeline = goals.timeline.trim(),
        vision = goals.vision.trim(),
        resources = goals.resources_or("Not specified"),
        constraints = goals.constraints_or("None mentioned"),
        priority = goals.priority(),
    )
}

/// Deterministic phased checklist built without a model.
pub fn fallback_action_plan(
    idea_title: &str,
    documents: &[DocumentContext],
    goals: &ActionPlanGoals,
) -> String {
    let mut plan = format!(
        "# {title}\n\n\
         ## Phase 1: Foundation (Weeks 1-2)\n\
         - [ ] Define clear success metrics and KPIs\n\
         - [ ] Study similar projects and learn from them\n\
         - [ ] Draft a project timeline with milestones\n\
         - [ ] Secure the resources you need ({resources})\n\n\
         ## Phase 2: Planning (Weeks 3-4)\n\
         - [ ] Break the vision into specific, measurable goals\n\
         - [ ] Assess risks and plan mitigations\n\
         - [ ] Allocate resources across the work\n\
         - [ ] Set up progress tracking\n\n\
         ## Phase 3: Execution (Weeks 5-12)\n\
         - [ ] Build the core of the idea\n\
         - [ ] Review progress regularly and adjust\n\
         - [ ] Resolve blockers as they appear\n\
         - [ ] Track metrics against the goals\n\n\
         ## Phase 4: Launch (Weeks 13-16)\n\
         - [ ] Final testing and quality checks\n\
         - [ ] Launch and gather feedback\n\
         - [ ] Iterate on real-world usage\n\
         - [ ] Scale what works\n\n\
         ## Success Metrics\n\
         - Timeline adherence: {timeline}\n\
         - Vision: {vision}\n\
         - Goal achievement rate\n\n\
         ## Next Immediate Actions\n\
         1. Schedule a planning session in the next few days\n\
         2. Write a one-page project charter\n\
         3. Identify the people who need to be involved\n\
         4. Set up a task tracker\n\n\
         ## Risk Mitigation\n\
         - Regular check-ins to address {constraints}\n\
         - Slack in the timeline for unexpected obstacles\n\
         - Backup plans for critical-path items\n",
        title = plan_title(idea_title),
        resources = goals.resources_or("time, budget, tools"),
        timeline = goals.timeline.trim(),
        vision = goals.vision.trim(),
        constraints = goals.constraints_or("potential challenges"),
    );

    if !documents.is_empty() {
        plan.push_str("\n## Research Insights\n");
        for doc in documents {
            let content = doc.content.as_deref().unwrap_or_default();
            let excerpt: String = content.chars().take(INSIGHT_CHARS).collect();
            let ellipsis = if content.chars().count() > INSIGHT_CHARS {
                "..."
            } else {
                ""
            };
            plan.push_str(&format!("- **{}**: {excerpt}{ellipsis}\n", doc.title));
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn goals() -> ActionPlanGoals {
        ActionPlanGoals {
            timeline: "3 months".into(),
            vision: "A thriving seed library".into(),
            ..Default::default()
        }
    }

    #[test]
    fn goals_require_timeline_and_vision() {
        let mut g = goals();
        assert!(g.validate().is_ok());

        g.timeline = "  ".into();
        assert_matches!(g.validate(), Err(CoreError::Validation(msg)) if msg == "Timeline is required");

        let g = ActionPlanGoals {
            vision: String::new(),
            ..goals()
        };
        assert_matches!(g.validate(), Err(CoreError::Validation(msg)) if msg == "Vision is required");
    }

    #[test]
    fn goals_reject_out_of_range_priority() {
        let g = ActionPlanGoals {
            priority: Some(11),
            ..goals()
        };
        assert_matches!(g.validate(), Err(CoreError::Validation(_)));
        assert_eq!(goals().priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn prompt_includes_goals_and_placeholders() {
        let idea = IdeaContext {
            title: "Seed Library".into(),
            ..Default::default()
        };
        let prompt = action_plan_prompt(&idea, &[], &goals());

        assert!(prompt.contains("IDEA: Seed Library"));
        assert!(prompt.contains("- Timeline: 3 months"));
        assert!(prompt.contains("- Resources: Not specified"));
        assert!(prompt.contains("- Priority: 5/10"));
        assert!(prompt.contains("No research documents available"));
    }

    #[test]
    fn fallback_plan_is_a_phased_checklist() {
        let plan = fallback_action_plan("Seed Library", &[], &goals());

        assert!(plan.starts_with("# Action Plan for Seed Library"));
        assert_eq!(plan.matches("## Phase").count(), 4);
        assert!(plan.contains("- [ ] "));
        assert!(plan.contains("Timeline adherence: 3 months"));
        assert!(plan.contains("address potential challenges"));
        assert!(!plan.contains("Research Insights"));
    }

    #[test]
    fn fallback_plan_quotes_research() {
        let docs = vec![DocumentContext {
            title: "Survey".into(),
            content: Some("x".repeat(200)),
        }];
        let plan = fallback_action_plan("Seed Library", &docs, &goals());

        assert!(plan.contains(&format!("- **Survey**: {}...", "x".repeat(150))));
    }

    #[test]
    fn fallback_plan_is_deterministic() {
        assert_eq!(
            fallback_action_plan("A", &[], &goals()),
            fallback_action_plan("A", &[], &goals())
        );
    }
}
