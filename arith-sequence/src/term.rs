//! Parameters and per-term records

use crate::error::ExplainError;
use crate::numeric::TermNumber;
use arith_core::Value;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Inputs of one generation: first term `a`, common difference `b`
/// and the number of terms `n`.
///
/// `term_count` is signed so that zero and negative counts reach
/// validation instead of being unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceParameters<T> {
    pub first_term: T,
    pub common_difference: T,
    pub term_count: i64,
}

impl<T: TermNumber> SequenceParameters<T> {
    pub fn new(first_term: T, common_difference: T, term_count: i64) -> Self {
        Self { first_term, common_difference, term_count }
    }

    /// Check the parameters and return the count as a length.
    pub fn validate(&self) -> Result<usize, ExplainError> {
        if !self.first_term.is_finite() {
            return Err(ExplainError::invalid("first_term", "must be a finite number"));
        }
        if !self.common_difference.is_finite() {
            return Err(ExplainError::invalid("common_difference", "must be a finite number"));
        }
        if self.term_count < 1 {
            return Err(ExplainError::invalid(
                "term_count",
                format!("must be at least 1, got {}", self.term_count),
            ));
        }
        usize::try_from(self.term_count)
            .map_err(|_| ExplainError::invalid("term_count", "too large for this platform"))
    }
}

/// Symbolic shape of a term, chosen by its multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermPattern {
    /// `a`
    FirstTerm,
    /// `a + b`
    FirstPlusDifference,
    /// `a + kb` for k >= 2
    Scaled(usize),
}

impl TermPattern {
    pub fn for_multiplier(multiplier: usize) -> Self {
        match multiplier {
            0 => TermPattern::FirstTerm,
            1 => TermPattern::FirstPlusDifference,
            k => TermPattern::Scaled(k),
        }
    }
}

impl fmt::Display for TermPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermPattern::FirstTerm => write!(f, "a"),
            TermPattern::FirstPlusDifference => write!(f, "a + b"),
            TermPattern::Scaled(k) => write!(f, "a + {}b", k),
        }
    }
}

impl Serialize for TermPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// One generated term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermRecord<T> {
    /// 1-based position `n`
    pub index: usize,
    pub value: T,
    /// How many times the difference was added: `index - 1`
    pub multiplier: usize,
    pub pattern: TermPattern,
    /// Substituted arithmetic for this term, e.g. `U_3 = 2 + (2 × 3) = 8`
    pub explanation: String,
}

impl<T: TermNumber> TermRecord<T> {
    /// Evaluate the closed form at `index` (1-based, already validated).
    pub(crate) fn build(first: &T, diff: &T, index: usize) -> Result<Self, ExplainError> {
        let multiplier = index - 1;
        let value = T::term(first, diff, multiplier).ok_or(ExplainError::Overflow { index })?;
        let pattern = TermPattern::for_multiplier(multiplier);
        let explanation = explain(first, diff, index, &value, pattern);
        Ok(Self { index, value, multiplier, pattern, explanation })
    }

    /// Object form used by plugin functions and protocol output.
    pub fn to_value(&self) -> Value {
        let mut obj = BTreeMap::new();
        obj.insert("index".to_string(), Value::from(self.index as i64));
        obj.insert("value".to_string(), Value::Number(self.value.to_number()));
        obj.insert("multiplier".to_string(), Value::from(self.multiplier as i64));
        obj.insert("pattern".to_string(), Value::Text(self.pattern.to_string()));
        obj.insert("explanation".to_string(), Value::Text(self.explanation.clone()));
        Value::Object(obj)
    }
}

fn explain<T: TermNumber>(first: &T, diff: &T, index: usize, value: &T, pattern: TermPattern) -> String {
    match pattern {
        TermPattern::FirstTerm => format!(
            "U_{} = a = {} ({} added 0 times)",
            index,
            value.render(),
            diff.render(),
        ),
        TermPattern::FirstPlusDifference => format!(
            "U_{} = {} + {} = {} ({} added 1 time)",
            index,
            first.render(),
            diff.render_operand(),
            value.render(),
            diff.render(),
        ),
        TermPattern::Scaled(k) => format!(
            "U_{} = {} + ({} × {}) = {}",
            index,
            first.render(),
            k,
            diff.render(),
            value.render(),
        ),
    }
}
