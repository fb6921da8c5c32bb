// Career-advice generation: task prompts, model selection, local GPT-2 and
// hosted completions. Hosted calls go through llm_client only.

pub mod generator;
#[cfg(feature = "local-models")]
pub mod gpt2;
pub mod handlers;
pub mod local;
pub mod prompts;
