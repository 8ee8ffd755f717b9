// Career report orchestration.
// Flow: load experiences -> sanitize -> single LLM call -> parse fixed-schema JSON.
// All LLM calls go through llm_client::CompletionBackend.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitize;
pub mod share;
pub mod status;
