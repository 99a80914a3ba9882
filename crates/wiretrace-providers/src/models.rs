use crate::traits::{ModelClass, ModelClassifier};

/// One model family: every model whose name starts with `prefix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelFamily {
    pub prefix: &'static str,
    pub provider: &'static str,
    pub model_type: &'static str,
}

impl ModelFamily {
    pub const fn new(prefix: &'static str, provider: &'static str, model_type: &'static str) -> Self {
        Self {
            prefix,
            provider,
            model_type,
        }
    }
}

/// Known model families (lowercase prefixes)
///
/// More specific prefixes win over shorter ones, so dated releases such as
/// `gpt-4o-2024-08-06` resolve without listing every version.
const MODEL_FAMILIES: &[ModelFamily] = &[
    // OpenAI
    ModelFamily::new("gpt-", "openai", "chat"),
    ModelFamily::new("chatgpt-", "openai", "chat"),
    ModelFamily::new("o1", "openai", "reasoning"),
    ModelFamily::new("o3", "openai", "reasoning"),
    ModelFamily::new("o4", "openai", "reasoning"),
    ModelFamily::new("text-embedding-", "openai", "embedding"),
    ModelFamily::new("codex-", "openai", "code"),
    ModelFamily::new("gpt-5-codex", "openai", "code"),
    // Anthropic
    ModelFamily::new("claude-", "anthropic", "chat"),
    // Google
    ModelFamily::new("gemini-", "google", "chat"),
    ModelFamily::new("gemini-embedding", "google", "embedding"),
    // DeepSeek
    ModelFamily::new("deepseek-", "deepseek", "chat"),
    ModelFamily::new("deepseek-reasoner", "deepseek", "reasoning"),
    ModelFamily::new("deepseek-r1", "deepseek", "reasoning"),
    ModelFamily::new("deepseek-coder", "deepseek", "code"),
    // Alibaba
    ModelFamily::new("qwen", "alibaba", "chat"),
    ModelFamily::new("qwq", "alibaba", "reasoning"),
    ModelFamily::new("text-embedding-v", "alibaba", "embedding"),
    // Zhipu
    ModelFamily::new("glm-", "zhipu", "chat"),
    // Moonshot
    ModelFamily::new("moonshot-", "moonshot", "chat"),
    ModelFamily::new("kimi-", "moonshot", "chat"),
    // Mistral
    ModelFamily::new("mistral-", "mistral", "chat"),
    ModelFamily::new("codestral", "mistral", "code"),
    // Meta
    ModelFamily::new("llama", "meta", "chat"),
];

/// Resolve a model family using longest prefix matching
///
/// Matching is case-insensitive and ignores a `vendor/` routing prefix such as
/// `openai/gpt-4o`.
pub fn resolve_model_family(model_name: &str) -> Option<&'static ModelFamily> {
    let lower = model_name.trim().to_lowercase();
    let bare = lower.rsplit('/').next().unwrap_or(lower.as_str());

    MODEL_FAMILIES
        .iter()
        .filter(|family| bare.starts_with(family.prefix))
        .max_by_key(|family| family.prefix.len())
}

/// Default classifier backed by the static family table
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixModelClassifier;

impl ModelClassifier for PrefixModelClassifier {
    fn classify(&self, model_name: &str) -> ModelClass {
        match resolve_model_family(model_name) {
            Some(family) => ModelClass {
                provider: family.provider.to_string(),
                model_type: family.model_type.to_string(),
            },
            None => ModelClass::unknown(),
        }
    }
}
