#![allow(dead_code)]

// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts whose response is re-validated before
/// persistence. The normalizer coerces anything off-schema, so the model is
/// asked for the exact shape but never trusted to produce it.
pub const SCHEMA_INSTRUCTION: &str = "\
    Follow the JSON schema in this prompt EXACTLY: same field names, same \
    nesting, no extra top-level fields. Use only the enum values listed for \
    enum fields. Numbers must be plain JSON numbers, not strings.";
