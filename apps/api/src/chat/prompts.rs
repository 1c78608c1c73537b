// Prompt constants for the follow-up chat.

/// System preamble template. Replace `{report}` with the active analysis
/// before sending; the model sees the full report on every turn.
pub const TUTOR_SYSTEM_TEMPLATE: &str = "You are a helpful tutor. \
The user has just received the following analysis of their academic performance:\n\
---\n\
{report}\n\
---\n\
Answer the user's follow-up questions based on this analysis. \
Be concrete and encouraging; refer back to the report where relevant.";

pub fn build_tutor_system(report: &str) -> String {
    TUTOR_SYSTEM_TEMPLATE.replace("{report}", report)
}
