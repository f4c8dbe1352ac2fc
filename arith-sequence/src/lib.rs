//! Arith Sequence
//!
//! Arithmetic sequences explained term by term: each generated term
//! carries its value, the multiplier of the common difference, a
//! symbolic pattern and a substituted explanation. Also exposes the
//! closed form `U_n = a + (n - 1)b` and the narrative around it, both
//! as a Rust API and as registry functions.
//!
//! Registry functions follow the never-panic philosophy and return
//! `Value::Error` on failure.

mod helpers;
mod numeric;
mod term;
mod error;
mod explainer;
mod narrative;
mod generators;
mod explain;

pub use numeric::TermNumber;
pub use term::{SequenceParameters, TermPattern, TermRecord};
pub use error::ExplainError;
pub use explainer::{ClosedForm, SequenceExplainer, TermSequence, Trend, CLOSED_FORM};
pub use narrative::{derivation_steps, WorkedExample, MULTIPLIER_HINT, REFLECTION_PROMPT};
pub use helpers::{extract_count, extract_number};

use arith_plugin::PluginRegistry;

/// Load sequence functions into registry
pub fn load_sequence_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Generators
        .with_function(generators::ArithmeticTerms)
        .with_function(generators::Arithmetic)
        .with_function(generators::NthTerm)

        // Explanation
        .with_function(explain::ClosedFormFn)
        .with_function(explain::WorkedExampleFn)
        .with_function(explain::Derivation)
}

/// Registry with every sequence function loaded
pub fn sequence_registry() -> PluginRegistry {
    load_sequence_library(PluginRegistry::new())
}
