// Cross-cutting prompt fragments. Each parse mode defines its own template in
// parser/prompts.rs and appends these.

/// Instruction that enforces raw-JSON output.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a valid JSON object \
    (no explanation, no formatting, no markdown, no code blocks, just the raw JSON).";

/// Instruction for fields the text does not mention.
pub const NULL_FIELDS_INSTRUCTION: &str = "If a field is not mentioned, set it to null \
    (or an empty array for list fields). Do NOT invent values.";
