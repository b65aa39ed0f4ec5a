// Shared prompt fragments. Each service that needs LLM calls keeps its own
// prompts.rs alongside it; this file only holds cross-cutting pieces.

/// System prompt for the tuned generation task. The tuned model was trained
/// with this exact instruction, so it must not be reworded.
pub const ENGLISH_ONLY_SYSTEM: &str = "speak in English";

/// Joins a list for inline use in a prompt, with a placeholder when empty.
pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
