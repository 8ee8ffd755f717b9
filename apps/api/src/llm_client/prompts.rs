// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// Keeps generated claims tied to what the user actually wrote.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every statement must be supported by the experiences provided. \
    Do NOT invent activities, results, or numbers that are not in the input. \
    Refer to experiences by their activityName or storyTitle exactly as written.";
