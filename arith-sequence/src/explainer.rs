//! Sequence generation and the closed form
//!
//! `SequenceExplainer::generate` evaluates `a + (n - 1)b` for every
//! index `1..=n` and attaches the pattern and explanation of each term.
//! It holds no state: every call builds a fresh `TermSequence` owned by
//! the caller, so it can be called from any number of threads.

use crate::error::ExplainError;
use crate::numeric::TermNumber;
use crate::term::{SequenceParameters, TermRecord};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The general rule for the n-th term. Independent of any parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClosedForm {
    pub symbolic: &'static str,
    pub description: &'static str,
}

pub const CLOSED_FORM: ClosedForm = ClosedForm {
    symbolic: "U_n = a + (n - 1)b",
    description: "The n-th term equals the first term a plus (n - 1) times the common difference b.",
};

impl fmt::Display for ClosedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbolic)
    }
}

/// Direction of the sequence, fixed by the sign of the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Constant,
}

impl Trend {
    pub fn of<T: TermNumber>(common_difference: &T) -> Self {
        match common_difference.sign() {
            Ordering::Greater => Trend::Increasing,
            Ordering::Less => Trend::Decreasing,
            Ordering::Equal => Trend::Constant,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Constant => write!(f, "constant"),
        }
    }
}

/// Generated terms in index order, together with the parameters that
/// produced them. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSequence<T> {
    params: SequenceParameters<T>,
    terms: Vec<TermRecord<T>>,
}

impl<T: TermNumber> TermSequence<T> {
    pub fn params(&self) -> &SequenceParameters<T> {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermRecord<T>> {
        self.terms.iter()
    }

    pub fn as_slice(&self) -> &[TermRecord<T>] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<TermRecord<T>> {
        self.terms
    }

    pub fn get(&self, index: usize) -> Option<&TermRecord<T>> {
        index.checked_sub(1).and_then(|i| self.terms.get(i))
    }

    pub fn last(&self) -> Option<&TermRecord<T>> {
        self.terms.last()
    }

    /// The first `count` terms; the whole sequence if `count` exceeds it.
    pub fn prefix(&self, count: usize) -> &[TermRecord<T>] {
        &self.terms[..count.min(self.terms.len())]
    }

    /// Every growing prefix, from one term up to all of them. An animated
    /// chart draws one frame per item.
    pub fn frames(&self) -> impl Iterator<Item = &[TermRecord<T>]> + '_ {
        (1..=self.terms.len()).map(move |i| &self.terms[..i])
    }

    /// Smallest and largest value over the whole sequence. Fixed axes for
    /// every frame are derived from this.
    pub fn value_bounds(&self) -> Option<(T, T)> {
        let mut iter = self.terms.iter();
        let first = iter.next()?;
        let mut min = first.value.clone();
        let mut max = first.value.clone();
        for term in iter {
            if term.value < min {
                min = term.value.clone();
            }
            if term.value > max {
                max = term.value.clone();
            }
        }
        Some((min, max))
    }

    pub fn trend(&self) -> Trend {
        Trend::of(&self.params.common_difference)
    }
}

impl<'a, T> IntoIterator for &'a TermSequence<T> {
    type Item = &'a TermRecord<T>;
    type IntoIter = std::slice::Iter<'a, TermRecord<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Pure transformation from parameters to explained terms.
pub struct SequenceExplainer;

impl SequenceExplainer {
    /// Generate `term_count` records, index 1 first.
    ///
    /// Fails with `InvalidParameter` if `term_count < 1`, and with
    /// `Overflow` if an `i64` term does not fit.
    pub fn generate<T: TermNumber>(params: SequenceParameters<T>) -> Result<TermSequence<T>, ExplainError> {
        let count = params.validate()?;
        let terms = (1..=count)
            .map(|index| TermRecord::build(&params.first_term, &params.common_difference, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TermSequence { params, terms })
    }

    /// A single term straight from the closed form, without its prefix.
    pub fn nth_term<T: TermNumber>(
        first_term: &T,
        common_difference: &T,
        index: i64,
    ) -> Result<TermRecord<T>, ExplainError> {
        if !first_term.is_finite() {
            return Err(ExplainError::invalid("first_term", "must be a finite number"));
        }
        if !common_difference.is_finite() {
            return Err(ExplainError::invalid("common_difference", "must be a finite number"));
        }
        if index < 1 {
            return Err(ExplainError::invalid("index", format!("must be at least 1, got {}", index)));
        }
        let index = usize::try_from(index)
            .map_err(|_| ExplainError::invalid("index", "too large for this platform"))?;
        TermRecord::build(first_term, common_difference, index)
    }

    pub fn closed_form() -> ClosedForm {
        CLOSED_FORM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::TermPattern;
    use arith_core::Number;
    use proptest::prelude::*;

    fn ints(a: i64, b: i64, n: i64) -> TermSequence<i64> {
        SequenceExplainer::generate(SequenceParameters::new(a, b, n)).unwrap()
    }

    #[test]
    fn test_scenario_tenth_term() {
        let seq = ints(2, 3, 10);
        assert_eq!(seq.len(), 10);
        let tenth = &seq.as_slice()[9];
        assert_eq!(tenth.index, 10);
        assert_eq!(tenth.value, 29);
        assert_eq!(tenth.multiplier, 9);
    }

    #[test]
    fn test_scenario_all_zero() {
        let seq = ints(0, 0, 5);
        assert!(seq.iter().all(|t| t.value == 0));
        assert_eq!(seq.trend(), Trend::Constant);
    }

    #[test]
    fn test_scenario_decreasing() {
        let seq = ints(5, -2, 4);
        let values: Vec<i64> = seq.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![5, 3, 1, -1]);
        assert_eq!(seq.trend(), Trend::Decreasing);
    }

    #[test]
    fn test_zero_terms_is_invalid() {
        let err = SequenceExplainer::generate(SequenceParameters::new(2i64, 3, 0)).unwrap_err();
        assert!(matches!(err, ExplainError::InvalidParameter { name: "term_count", .. }));
    }

    #[test]
    fn test_single_term() {
        let seq = ints(7, 4, 1);
        assert_eq!(seq.len(), 1);
        let only = &seq.as_slice()[0];
        assert_eq!(only.multiplier, 0);
        assert_eq!(only.pattern, TermPattern::FirstTerm);
        assert_eq!(only.value, 7);
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = SequenceExplainer::generate(SequenceParameters::new(i64::MAX - 1, 1, 3)).unwrap_err();
        assert_eq!(err, ExplainError::Overflow { index: 3 });
    }

    #[test]
    fn test_decimal_inputs_are_exact() {
        let params = SequenceParameters::new(
            Number::from_str("0.1").unwrap(),
            Number::from_str("0.1").unwrap(),
            3,
        );
        let seq = SequenceExplainer::generate(params).unwrap();
        let rendered: Vec<String> = seq.iter().map(|t| t.value.to_string()).collect();
        assert_eq!(rendered, vec!["0.1", "0.2", "0.3"]);
    }

    #[test]
    fn test_float_inputs() {
        let seq = SequenceExplainer::generate(SequenceParameters::new(1.5f64, 0.5, 3)).unwrap();
        let values: Vec<f64> = seq.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.5, 2.0, 2.5]);
    }

    #[test]
    fn test_nth_term_matches_generate() {
        let seq = ints(2, 3, 10);
        let direct = SequenceExplainer::nth_term(&2i64, &3, 10).unwrap();
        assert_eq!(seq.last(), Some(&direct));
    }

    #[test]
    fn test_nth_term_rejects_index_zero() {
        let err = SequenceExplainer::nth_term(&2i64, &3, 0).unwrap_err();
        assert!(matches!(err, ExplainError::InvalidParameter { name: "index", .. }));
    }

    #[test]
    fn test_get_is_one_based() {
        let seq = ints(2, 3, 4);
        assert_eq!(seq.get(1).map(|t| t.value), Some(2));
        assert_eq!(seq.get(4).map(|t| t.value), Some(11));
        assert!(seq.get(0).is_none());
        assert!(seq.get(5).is_none());
    }

    #[test]
    fn test_prefix_and_frames() {
        let seq = ints(2, 3, 4);
        assert_eq!(seq.prefix(2).len(), 2);
        assert_eq!(seq.prefix(99).len(), 4);
        let frame_lengths: Vec<usize> = seq.frames().map(|f| f.len()).collect();
        assert_eq!(frame_lengths, vec![1, 2, 3, 4]);
        let last_frame = seq.frames().last().unwrap();
        assert_eq!(last_frame, seq.as_slice());
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(ints(2, 3, 10).value_bounds(), Some((2, 29)));
        assert_eq!(ints(5, -2, 4).value_bounds(), Some((-1, 5)));
    }

    #[test]
    fn test_closed_form_is_constant() {
        let form = SequenceExplainer::closed_form();
        assert_eq!(form.to_string(), "U_n = a + (n - 1)b");
        assert_eq!(form, CLOSED_FORM);
    }

    #[test]
    fn test_sequence_serializes() {
        let json = serde_json::to_value(ints(2, 3, 2)).unwrap();
        assert_eq!(json["params"]["term_count"], 2);
        assert_eq!(json["terms"][1]["explanation"], "U_2 = 2 + 3 = 5 (3 added 1 time)");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn generated_length_and_indices(a in -1000i64..1000, b in -1000i64..1000, n in 1i64..200) {
            let seq = ints(a, b, n);
            prop_assert_eq!(seq.len() as i64, n);
            for (i, term) in seq.iter().enumerate() {
                prop_assert_eq!(term.index, i + 1);
                prop_assert_eq!(term.multiplier, i);
                prop_assert_eq!(term.value, a + (i as i64) * b);
            }
        }

        #[test]
        fn monotonic_in_sign_of_difference(a in -1000i64..1000, b in -1000i64..1000, n in 2i64..100) {
            let seq = ints(a, b, n);
            for pair in seq.as_slice().windows(2) {
                match b.cmp(&0) {
                    Ordering::Greater => prop_assert!(pair[0].value < pair[1].value),
                    Ordering::Less => prop_assert!(pair[0].value > pair[1].value),
                    Ordering::Equal => prop_assert_eq!(pair[0].value, pair[1].value),
                }
            }
        }

        #[test]
        fn generation_is_idempotent(a in -1000i64..1000, b in -1000i64..1000, n in 1i64..100) {
            let params = SequenceParameters::new(a, b, n);
            let first = SequenceExplainer::generate(params.clone()).unwrap();
            let second = SequenceExplainer::generate(params).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn pattern_follows_multiplier(a in -50i64..50, b in -50i64..50, n in 1i64..60) {
            for term in &ints(a, b, n) {
                let expected = match term.multiplier {
                    0 => TermPattern::FirstTerm,
                    1 => TermPattern::FirstPlusDifference,
                    k => TermPattern::Scaled(k),
                };
                prop_assert_eq!(term.pattern, expected);
            }
        }

        #[test]
        fn non_positive_counts_fail(n in -1000i64..=0) {
            let result = SequenceExplainer::generate(SequenceParameters::new(1i64, 1, n));
            let is_invalid = matches!(result, Err(ExplainError::InvalidParameter { .. }));
            prop_assert!(is_invalid);
        }

        #[test]
        fn decimal_terms_match_formula(a in -500i64..500, b in -500i64..500, n in 1i64..40) {
            // Hundredths exercise non-integer inputs exactly
            let first = Number::from_ratio(a, 100);
            let diff = Number::from_ratio(b, 100);
            let seq = SequenceExplainer::generate(SequenceParameters::new(first.clone(), diff.clone(), n)).unwrap();
            for term in &seq {
                let expected = first.add(&Number::from_i64(term.multiplier as i64).mul(&diff));
                prop_assert_eq!(&term.value, &expected);
            }
            if let Some((min, max)) = seq.value_bounds() {
                prop_assert!(min <= max);
            }
        }
    }
}
