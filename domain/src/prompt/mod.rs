//! Prompt domain
//!
//! Templates for the debate, critique and challenge workflows.

mod template;

pub use template::PromptTemplate;
