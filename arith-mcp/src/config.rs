//! Server configuration from the environment
//!
//! - `ARITH_MAX_TERMS`: largest term count a tool call may request
//! - `ARITH_DEFAULT_FIRST`, `ARITH_DEFAULT_DIFF`, `ARITH_DEFAULT_COUNT`:
//!   parameters used when a tool call leaves one out
//!
//! Unparseable values fall back to the default with a warning.

use arith_core::Number;
use arith_plugin::DEFAULT_MAX_TERMS;
use std::env;
use tracing::warn;

pub const MAX_TERMS_VAR: &str = "ARITH_MAX_TERMS";
pub const DEFAULT_FIRST_VAR: &str = "ARITH_DEFAULT_FIRST";
pub const DEFAULT_DIFF_VAR: &str = "ARITH_DEFAULT_DIFF";
pub const DEFAULT_COUNT_VAR: &str = "ARITH_DEFAULT_COUNT";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_terms: usize,
    pub default_first: Number,
    pub default_diff: Number,
    pub default_count: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_terms: DEFAULT_MAX_TERMS,
            default_first: Number::from_i64(2),
            default_diff: Number::from_i64(3),
            default_count: 10,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_terms = parse_or(&lookup, MAX_TERMS_VAR, defaults.max_terms, |s| {
            s.parse::<usize>().ok().filter(|n| *n >= 1)
        });
        let default_first = parse_or(&lookup, DEFAULT_FIRST_VAR, defaults.default_first, |s| {
            Number::from_str(s).ok()
        });
        let default_diff = parse_or(&lookup, DEFAULT_DIFF_VAR, defaults.default_diff, |s| {
            Number::from_str(s).ok()
        });
        let default_count = parse_or(&lookup, DEFAULT_COUNT_VAR, defaults.default_count, |s| {
            s.parse::<i64>().ok().filter(|n| *n >= 1)
        });

        Self { max_terms, default_first, default_diff, default_count }
    }
}

fn parse_or<T, L, P>(lookup: &L, key: &str, default: T, parse: P) -> T
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match parse(raw.trim()) {
            Some(v) => v,
            None => {
                warn!(key, value = %raw, "ignoring invalid setting, using default");
                default
            }
        },
    }
}
