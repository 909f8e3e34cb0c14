// Cross-cutting prompt fragments. Criterion instructions live in evaluation::prompts.

/// Generic system message sent ahead of each chat-style extraction call.
pub const HELPFUL_ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
