//! Conversational Follow-up — questions about the active report.
//!
//! The remote model is stateless from this system's perspective: every turn
//! resends the report-grounded system preamble plus the full prior history.

pub mod handlers;
pub mod prompts;

use crate::llm_client::{ChatMessage, LlmClient};
use crate::session::ChatTurn;

/// Asks the model the follow-up `question` against `history` and the active
/// report. A remote failure is returned as a user-visible error string in
/// place of the assistant's reply — errors are not distinguished from content
/// at the data-model level (documented quirk).
pub async fn respond(
    llm: &LlmClient,
    history: &[ChatTurn],
    question: &str,
    grounding_report: &str,
) -> String {
    let system = prompts::build_tutor_system(grounding_report);

    let mut messages: Vec<ChatMessage<'_>> = history
        .iter()
        .map(|turn| ChatMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        })
        .collect();
    messages.push(ChatMessage {
        role: "user",
        content: question,
    });

    match llm.call_with_messages(messages, &system).await {
        Ok(response) => response
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| "Sorry, the model returned an empty reply.".to_string()),
        Err(e) => format!("Sorry, an error occurred while processing your question: {e}"),
    }
}
