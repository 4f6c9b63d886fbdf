//! Prompt construction for the project-overview chat and document writer.
//!
//! Category and tone are closed sets with an explicit fallback: unknown or
//! missing keys resolve to [`Category::General`] and [`Tone::Warm`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chat::{DocumentContext, IdeaContext};

/// Characters of each document kept in the research digest.
pub const DOCUMENT_SUMMARY_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Project domain. Selects guidance text, opening line and document template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Creative,
    Health,
    Education,
    Social,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Technology,
        Self::Business,
        Self::Creative,
        Self::Health,
        Self::Education,
        Self::Social,
        Self::General,
    ];

    /// Resolve a free-form key, falling back to `General`.
    pub fn from_key(key: Option<&str>) -> Self {
        let Some(key) = key else {
            return Self::General;
        };
        let key = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Health => "health",
            Self::Education => "education",
            Self::Social => "social",
            Self::General => "general",
        }
    }

    /// Domain-specific focus areas appended to every system prompt.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Technology => {
                "This is a technology project. Focus on:\n\
                 - Architecture and how it will be implemented\n\
                 - User experience and interface design\n\
                 - Performance and how the system scales\n\
                 - Development milestones and timeline\n\
                 - Platform and technology choices\n\
                 - Adoption and product-market fit\n\n\
                 Ask about technical challenges, user workflows, and how the technology serves the people using it."
            }
            Self::Business => {
                "This is a business project. Focus on:\n\
                 - The market opportunity and target customers\n\
                 - Revenue model and pricing\n\
                 - Competitors and differentiation\n\
                 - Value proposition\n\
                 - Growth and scaling plans\n\
                 - Metrics that signal success\n\n\
                 Ask about customer pain points, market research, and whether the business is viable."
            }
            Self::Creative => {
                "This is a creative project. Focus on:\n\
                 - Artistic vision and creative direction\n\
                 - Emotional impact on the audience\n\
                 - Aesthetic choices and design philosophy\n\
                 - Story and narrative elements\n\
                 - How the audience engages and connects\n\
                 - The creative process and its inspirations\n\n\
                 Ask about the vision, the feelings it should evoke, and what makes it artistically distinct."
            }
            Self::Health => {
                "This is a health and wellness project. Focus on:\n\
                 - Health outcomes and benefits for users\n\
                 - Safety and regulatory concerns\n\
                 - Evidence and research behind the approach\n\
                 - Accessibility and inclusivity\n\
                 - Motivation and lasting behaviour change\n\
                 - How impact will be measured\n\n\
                 Ask about health goals, user needs, and how the project improves wellbeing."
            }
            Self::Education => {
                "This is an education project. Focus on:\n\
                 - Learning objectives and outcomes\n\
                 - Who the learners are and what they need\n\
                 - Teaching methodology\n\
                 - Assessment and progress tracking\n\
                 - Accessibility and different learning styles\n\
                 - Retention and real-world application\n\n\
                 Ask about learning goals, the audience, and the educational impact."
            }
            Self::Social => {
                "This is a social impact project. Focus on:\n\
                 - The community need or social problem\n\
                 - Measurable outcomes and impact\n\
                 - Stakeholders and partnerships\n\
                 - Long-term sustainability\n\
                 - Advocacy and social change\n\
                 - Building community and connection\n\n\
                 Ask about social goals, community needs, and the change the project should create."
            }
            Self::General => {
                "This is a general project. Focus on:\n\
                 - The core concept and what makes it valuable\n\
                 - Who it is for and what they need\n\
                 - Implementation approach and timeline\n\
                 - Goals and success metrics\n\
                 - Challenges and opportunities\n\
                 - How it could grow and evolve\n\n\
                 Ask about the core idea, who benefits, and what makes the project special."
            }
        }
    }

    /// First assistant turn of every conversation.
    pub fn opening_message(&self, title: &str) -> String {
        match self {
            Self::Technology => format!(
                "Hey! I'm excited to help shape this tech project. I can see you're working on \"{title}\". \
                 What inspired it? What problem are you trying to solve, or what opportunity are you exploring?"
            ),
            Self::Business => format!(
                "Hi there! \"{title}\" sounds like an interesting business idea. \
                 Let's start with the core: what opportunity do you see, and who would your ideal customer be?"
            ),
            Self::Creative => format!(
                "Hello! I love creative projects like \"{title}\". \
                 What's the vision behind it? What feeling or experience do you want to create?"
            ),
            Self::Health => format!(
                "Hi! \"{title}\" sounds meaningful. \
                 Let's start with the health goal: what positive change do you hope to create for people?"
            ),
            Self::Education => format!(
                "Hello! \"{title}\" sounds like it could make a real difference. \
                 What knowledge or skills are you hoping to share, and with whom?"
            ),
            Self::Social => format!(
                "Hi there! \"{title}\" sounds like it could create positive change. \
                 What community need or issue are you addressing?"
            ),
            Self::General => format!(
                "Hey! I'm here to help you explore and shape this idea. \"{title}\" sounds interesting! \
                 What's the spark behind this project?"
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Conversational style requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Warm,
    Professional,
    Playful,
    Poetic,
    Analytical,
    Casual,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Self::Warm,
        Self::Professional,
        Self::Playful,
        Self::Poetic,
        Self::Analytical,
        Self::Casual,
    ];

    /// Resolve a free-form key, falling back to `Warm`.
    pub fn from_key(key: Option<&str>) -> Self {
        let Some(key) = key else {
            return Self::Warm;
        };
        let key = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Professional => "professional",
            Self::Playful => "playful",
            Self::Poetic => "poetic",
            Self::Analytical => "analytical",
            Self::Casual => "casual",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Warm => "Keep a warm, encouraging and supportive tone throughout the conversation.",
            Self::Professional => "Keep responses professional, structured and business-focused.",
            Self::Playful => "Take a playful, creative and lighthearted approach.",
            Self::Poetic => "Respond in a poetic, artistic and expressive style.",
            Self::Analytical => "Favour analytical thinking, data-driven insight and logical structure.",
            Self::Casual => "Use a casual, friendly and relaxed conversational style.",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Document digest
// ---------------------------------------------------------------------------

/// Summarise attached documents, one line each, content cut to
/// [`DOCUMENT_SUMMARY_CHARS`] characters.
pub fn summarize_documents(documents: &[DocumentContext]) -> String {
    if documents.is_empty() {
        return "No research documents available.".to_string();
    }

    documents
        .iter()
        .map(|doc| {
            let content = doc.content.as_deref().filter(|c| !c.is_empty());
            match content {
                Some(content) => {
                    let summary: String = content.chars().take(DOCUMENT_SUMMARY_CHARS).collect();
                    let ellipsis = if content.chars().count() > DOCUMENT_SUMMARY_CHARS {
                        "..."
                    } else {
                        ""
                    };
                    format!("- {}: {summary}{ellipsis}", doc.title)
                }
                None => format!("- {}: No content available", doc.title),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// System prompts
// ---------------------------------------------------------------------------

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

/// System prompt for the live project-overview conversation.
pub fn chat_system_prompt(idea: &IdeaContext, documents: &[DocumentContext], tone: Tone) -> String {
    let category = idea.category();
    format!(
        "You are a thoughtful creative assistant helping the user explore and grow an idea. \
         Your goal is to help them build a clear, compelling project overview together.\n\n\
         Idea: {title}\n\
         Description: {description}\n\
         Category: {category_label}\n\
         Content: {content}\n\n\
         Research Documents:\n{digest}\n\n\
         {guidance}\n\n\
         {tone}\n\n\
         Be curious and genuinely interested in the idea. Ask thoughtful follow-up questions that help \
         clarify the vision. When you have enough information, offer to generate a structured markdown document.\n\n\
         Keep responses conversational and natural.",
        title = idea.title,
        description = or_placeholder(idea.description.as_deref(), "No description provided"),
        category_label = or_placeholder(idea.category.as_deref(), "General"),
        content = or_placeholder(idea.content.as_deref(), "No additional content"),
        digest = summarize_documents(documents),
        guidance = category.guidance(),
        tone = tone.instruction(),
    )
}

/// System prompt for the one-shot document writer.
pub fn document_system_prompt(
    idea: &IdeaContext,
    documents: &[DocumentContext],
    template: &str,
    tone: Tone,
) -> String {
    let category = idea.category();
    format!(
        "You are an expert project document writer. Generate a comprehensive project overview \
         document from the conversation and the template below.\n\n\
         IDEA: {title}\n\
         DESCRIPTION: {description}\n\
         CATEGORY: {category_label}\n\
         CONTENT: {content}\n\n\
         RESEARCH DOCUMENTS:\n{digest}\n\n\
         CONVERSATION CONTEXT: The user has discussed this project in detail. Use the conversation \
         history to inform the document.\n\n\
         TEMPLATE TO FOLLOW:\n{template}\n\n\
         {guidance}\n\n\
         {tone}\n\n\
         INSTRUCTIONS:\n\
         1. Fill in the template with specific, detailed content drawn from the conversation\n\
         2. Replace the placeholders {{projectTitle}}, {{description}} and {{date}} with real values\n\
         3. Make the document specific and actionable\n\
         4. Keep the requested tone and style\n\
         5. Keep the structure complete and well organised\n\n\
         Generate the complete project overview document in markdown.",
        title = idea.title,
        description = or_placeholder(idea.description.as_deref(), "No description provided"),
        category_label = or_placeholder(idea.category.as_deref(), "General"),
        content = or_placeholder(idea.content.as_deref(), "No additional content"),
        digest = summarize_documents(documents),
        guidance = category.guidance(),
        tone = tone.instruction(),
    )
}
