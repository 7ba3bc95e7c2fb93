// News analysis: five prompt-backed analyzers plus the scoring helpers the
// presentation layer uses. All model calls go through llm_client.

pub mod article;
pub mod cross_check;
pub mod handlers;
pub mod integrity;
pub mod models;
pub mod prompts;
pub mod source;
pub mod truth_probability;
pub mod verdict;
