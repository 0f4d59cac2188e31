pub mod explanation_service;
pub mod prompt_builder;
pub mod response_extractor;

pub use explanation_service::ExplanationService;
pub use prompt_builder::{build_prompt, PromptOptions};
pub use response_extractor::{extract, Extracted, FALLBACK_EXPLANATION};
