//! Evaluation Context

/// Upper bound on generated terms when the caller sets none
pub const DEFAULT_MAX_TERMS: usize = 100_000;

/// Evaluation context passed to plugins
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub max_terms: usize,
}

impl EvalContext {
    pub fn new() -> Self {
        Self { max_terms: DEFAULT_MAX_TERMS }
    }

    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
