//! Boundary to the hosted text-generation service.

use crate::CoreError;

/// Sampling parameters passed through to the generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// One-shot text generation. Implementations carry their own bounded
/// timeout and never retry; callers decide what a failure means.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, CoreError>;
}
