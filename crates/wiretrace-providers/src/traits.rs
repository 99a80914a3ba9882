/// Provider and model type derived from a model name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelClass {
    pub provider: String,
    pub model_type: String,
}

impl ModelClass {
    pub fn unknown() -> Self {
        Self {
            provider: "unknown".to_string(),
            model_type: "unknown".to_string(),
        }
    }
}

/// Model name classification
///
/// The LLM normalizer only needs provider and model type for display; how they
/// are derived is up to the implementation.
pub trait ModelClassifier: Send + Sync {
    fn classify(&self, model_name: &str) -> ModelClass;
}
