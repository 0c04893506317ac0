//! Runtime values substituted into templates

/// Per-invocation values available to template resolution.
///
/// Seed and model name come from whatever generation metadata the host
/// passed along; either may be missing, in which case the matching token
/// resolves to the literal `"unknown"`. The counter is owned by the saver
/// node and incremented once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Generation seed, if the upstream metadata carried one
    pub seed: Option<i64>,
    /// Model/checkpoint name, if the upstream metadata carried one
    pub model_name: Option<String>,
    /// Invocation counter, starts at 1 for the first save of a process
    pub counter: u64,
}

impl RunContext {
    /// Create a context with the given counter and no metadata
    pub fn new(counter: u64) -> Self {
        Self {
            seed: None,
            model_name: None,
            counter,
        }
    }

    /// Set the generation seed
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_name = Some(model.into());
        self
    }
}
