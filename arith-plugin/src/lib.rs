//! Arith Plugin System
//!
//! Provides the `FunctionPlugin` trait for extending Arith with pure
//! computations, and the registry that dispatches calls to them.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, DEFAULT_MAX_TERMS};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext,
    };
    pub use arith_core::prelude::*;
}
