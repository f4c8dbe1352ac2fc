//! Narrative pieces around the closed form
//!
//! The derivation ladder that leads a learner from `U_1 = a` to the
//! general rule, the reflection question about the multiplier, and a
//! worked example built from the last generated term. Plain strings and
//! numbers only; markup belongs to whoever renders them.

use crate::explainer::TermSequence;
use crate::numeric::TermNumber;
use serde::Serialize;

/// Question pointing the learner at the multiplier of `b`.
pub const REFLECTION_PROMPT: &str =
    "Look at the coefficient in front of the difference b. For the n-th term, how many times has b been added?";

/// Observation that closes the derivation ladder.
pub const MULTIPLIER_HINT: &str = "The multiplier of b is always one less than n.";

/// Generic ladder `U_1 = a`, `U_2 = a + 1·b`, ... with `count` lines.
pub fn derivation_steps(count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| match n {
            1 => "U_1 = a".to_string(),
            n => format!("U_{} = a + {}·b", n, n - 1),
        })
        .collect()
}

/// Manual check of the closed form on the last term of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkedExample<T> {
    pub first_term: T,
    pub common_difference: T,
    pub term_count: usize,
    pub value: T,
    /// e.g. `2 + (10 - 1) × 3 = 29`
    pub computation: String,
}

impl<T: TermNumber> WorkedExample<T> {
    pub fn from_sequence(seq: &TermSequence<T>) -> Option<Self> {
        let last = seq.last()?;
        let params = seq.params();
        let computation = format!(
            "{} + ({} - 1) × {} = {}",
            params.first_term.render(),
            last.index,
            params.common_difference.render_operand(),
            last.value.render(),
        );
        Some(Self {
            first_term: params.first_term.clone(),
            common_difference: params.common_difference.clone(),
            term_count: last.index,
            value: last.value.clone(),
            computation,
        })
    }

    /// Lines for a narrative renderer, one fact per line.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("a (first term) = {}", self.first_term.render()),
            format!("b (common difference) = {}", self.common_difference.render()),
            format!("n (term sought) = {}", self.term_count),
            format!("Check by hand: {}", self.computation),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explainer::SequenceExplainer;
    use crate::term::SequenceParameters;
    use arith_core::Number;

    #[test]
    fn test_derivation_steps() {
        let steps = derivation_steps(4);
        assert_eq!(steps, vec!["U_1 = a", "U_2 = a + 1·b", "U_3 = a + 2·b", "U_4 = a + 3·b"]);
        assert!(derivation_steps(0).is_empty());
    }

    #[test]
    fn test_worked_example_from_last_term() {
        let seq = SequenceExplainer::generate(SequenceParameters::new(2i64, 3, 10)).unwrap();
        let example = WorkedExample::from_sequence(&seq).unwrap();
        assert_eq!(example.term_count, 10);
        assert_eq!(example.value, 29);
        assert_eq!(example.computation, "2 + (10 - 1) × 3 = 29");
    }

    #[test]
    fn test_worked_example_negative_difference() {
        let seq = SequenceExplainer::generate(SequenceParameters::new(5i64, -2, 4)).unwrap();
        let example = WorkedExample::from_sequence(&seq).unwrap();
        assert_eq!(example.computation, "5 + (4 - 1) × (-2) = -1");
    }

    #[test]
    fn test_worked_example_lines() {
        let params = SequenceParameters::new(Number::from_str("0.5").unwrap(), Number::from_i64(2), 3);
        let seq = SequenceExplainer::generate(params).unwrap();
        let lines = WorkedExample::from_sequence(&seq).unwrap().lines();
        assert_eq!(lines[0], "a (first term) = 0.5");
        assert_eq!(lines[2], "n (term sought) = 3");
        assert_eq!(lines[3], "Check by hand: 0.5 + (3 - 1) × 2 = 4.5");
    }
}
