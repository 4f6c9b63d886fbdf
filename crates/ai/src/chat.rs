//! Project-overview chat, document generation and action-plan generation.

use std::sync::Arc;

use futures::stream::BoxStream;
use idea_garden_core::action_plan::{action_plan_prompt, fallback_action_plan, ActionPlanGoals};
use idea_garden_core::chat::{
    build_prompt_messages, ChatMessage, DocumentContext, IdeaContext, PromptMessage, Role,
};
use idea_garden_core::prompt::{chat_system_prompt, document_system_prompt, Tone};
use serde::Deserialize;

use crate::error::AiError;
use crate::provider::{AiProvider, CompletionOptions};
use crate::stream::{error_only, into_frames};

/// Body of a chat or document-generation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub idea: IdeaContext,
    #[serde(default)]
    pub documents: Vec<DocumentContext>,
    #[serde(default)]
    pub tone: Option<String>,
    /// Document generation only; defaults to the category template.
    #[serde(default)]
    pub template: Option<String>,
}

impl ChatRequest {
    pub fn tone(&self) -> Tone {
        Tone::from_key(self.tone.as_deref())
    }

    /// The template to fill: the request's, or the idea category's.
    pub fn template(&self) -> String {
        self.template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.idea.category().document_template())
    }

    /// Messages for the live conversation.
    pub fn chat_messages(&self) -> Vec<PromptMessage> {
        let system = chat_system_prompt(&self.idea, &self.documents, self.tone());
        build_prompt_messages(&self.messages, &system, &self.idea)
    }

    /// Messages for the one-shot document writer.
    pub fn document_messages(&self) -> Vec<PromptMessage> {
        let system = document_system_prompt(&self.idea, &self.documents, &self.template(), self.tone());
        build_prompt_messages(&self.messages, &system, &self.idea)
    }
}

/// Where a generated action plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Model,
    Fallback,
}

#[derive(Clone)]
pub struct ChatService {
    provider: Option<Arc<dyn AiProvider>>,
}

impl ChatService {
    pub fn new(provider: Option<Arc<dyn AiProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&Arc<dyn AiProvider>, AiError> {
        self.provider.as_ref().ok_or(AiError::NotConfigured)
    }

    /// Stream the assistant's reply as browser frames.
    ///
    /// Never fails: a provider that is missing or refuses the request
    /// yields a single error frame.
    pub async fn stream_overview(&self, request: &ChatRequest) -> BoxStream<'static, String> {
        let messages = request.chat_messages();
        tracing::info!(
            title = %request.idea.title,
            history = request.messages.len(),
            tone = %request.tone(),
            "Starting project overview stream"
        );

        let started = match self.provider() {
            Ok(provider) => provider.stream(&messages, CompletionOptions::CHAT).await,
            Err(e) => Err(e),
        };
        match started {
            Ok(tokens) => into_frames(tokens),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start chat stream");
                error_only()
            }
        }
    }

    /// Write a full project-overview document.
    pub async fn generate_document(&self, request: &ChatRequest) -> Result<String, AiError> {
        let provider = self.provider()?;
        tracing::info!(
            title = %request.idea.title,
            history = request.messages.len(),
            documents = request.documents.len(),
            "Generating project document"
        );
        let document = provider
            .complete(&request.document_messages(), CompletionOptions::DOCUMENT)
            .await?;
        tracing::info!(length = document.len(), "Document generated");
        Ok(document)
    }

    /// Produce a markdown action plan, falling back to a local checklist
    /// when the model is unavailable.
    pub async fn generate_action_plan(
        &self,
        idea: &IdeaContext,
        documents: &[DocumentContext],
        goals: &ActionPlanGoals,
    ) -> (String, PlanSource) {
        let Ok(provider) = self.provider() else {
            return (fallback_action_plan(&idea.title, documents, goals), PlanSource::Fallback);
        };

        let messages = [
            PromptMessage::new(
                Role::System,
                "You are a pragmatic project planner. Answer with a markdown checklist only.",
            ),
            PromptMessage::new(Role::User, action_plan_prompt(idea, documents, goals)),
        ];
        match provider.complete(&messages, CompletionOptions::ACTION_PLAN).await {
            Ok(plan) => (plan, PlanSource::Model),
            Err(e) => {
                tracing::warn!(error = %e, "Action plan generation failed, using fallback");
                (fallback_action_plan(&idea.title, documents, goals), PlanSource::Fallback)
            }
        }
    }
}
