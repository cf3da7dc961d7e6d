// Shared prompt fragments.
// Each stage defines its own templates in workflow/prompts.rs.
// This file contains cross-cutting instructions.

/// Closing instruction for prompts that expect a single JSON object.
pub const JSON_OBJECT_ONLY: &str = "Return ONLY the JSON object, no other text.";

/// Closing instruction for prompts that expect a JSON array.
pub const JSON_ARRAY_ONLY: &str = "Return ONLY the JSON array, no other text.";
