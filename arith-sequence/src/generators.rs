//! Sequence generators
//!
//! arithmetic_terms, arithmetic, nth_term

use arith_plugin::prelude::*;
use crate::explainer::SequenceExplainer;
use crate::helpers::{expect_args, extract_count, extract_number};
use crate::term::SequenceParameters;

/// Shared `(first, diff, count)` argument parsing
fn sequence_params(func: &str, args: &[Value], ctx: &EvalContext) -> Result<SequenceParameters<Number>, ArithError> {
    expect_args(func, args, 3)?;
    let first = extract_number(&args[0], "first").map_err(|e| e.in_function(func))?;
    let diff = extract_number(&args[1], "diff").map_err(|e| e.in_function(func))?;
    let count = extract_count(&args[2], "count", func, ctx.max_terms)?;
    Ok(SequenceParameters::new(first, diff, count))
}

static SEQUENCE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("first", "Number", "First term a"),
    ArgMeta::required("diff", "Number", "Common difference b"),
    ArgMeta::required("count", "Number", "Number of terms n (at least 1)"),
];

// ============ ArithmeticTerms ============

pub struct ArithmeticTerms;

static ARITHMETIC_TERMS_EXAMPLES: [&str; 2] = [
    "arithmetic_terms(2, 3, 3) → [{index: 1, value: 2, pattern: \"a\"}, {index: 2, value: 5, pattern: \"a + b\"}, {index: 3, value: 8, pattern: \"a + 2b\"}]",
    "arithmetic_terms(5, -2, 4) → values 5, 3, 1, -1",
];

static ARITHMETIC_TERMS_RELATED: [&str; 3] = ["arithmetic", "nth_term", "closed_form"];

impl FunctionPlugin for ArithmeticTerms {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "arithmetic_terms",
            description: "Generate explained terms U_n = a + (n-1)b with index, value, multiplier, pattern and explanation",
            usage: "arithmetic_terms(first, diff, count)",
            args: &SEQUENCE_ARGS,
            returns: "List<Object>",
            examples: &ARITHMETIC_TERMS_EXAMPLES,
            category: "sequence/arithmetic",
            related: &ARITHMETIC_TERMS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let params = match sequence_params("arithmetic_terms", args, ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        match SequenceExplainer::generate(params) {
            Ok(seq) => Value::List(seq.iter().map(|t| t.to_value()).collect()),
            Err(e) => Value::Error(ArithError::from(e).in_function("arithmetic_terms")),
        }
    }
}

// ============ Arithmetic ============

pub struct Arithmetic;

static ARITHMETIC_EXAMPLES: [&str; 1] = [
    "arithmetic(5, 3, 6) → [5, 8, 11, 14, 17, 20]",
];

static ARITHMETIC_RELATED: [&str; 2] = ["arithmetic_terms", "nth_term"];

impl FunctionPlugin for Arithmetic {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "arithmetic",
            description: "Generate arithmetic sequence values: a_n = first + (n-1) × diff",
            usage: "arithmetic(first, diff, count)",
            args: &SEQUENCE_ARGS,
            returns: "List<Number>",
            examples: &ARITHMETIC_EXAMPLES,
            category: "sequence/arithmetic",
            related: &ARITHMETIC_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let params = match sequence_params("arithmetic", args, ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        match SequenceExplainer::generate(params) {
            Ok(seq) => Value::List(seq.into_terms().into_iter().map(|t| Value::Number(t.value)).collect()),
            Err(e) => Value::Error(ArithError::from(e).in_function("arithmetic")),
        }
    }
}

// ============ NthTerm ============

pub struct NthTerm;

static NTH_TERM_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("first", "Number", "First term a"),
    ArgMeta::required("diff", "Number", "Common difference b"),
    ArgMeta::required("n", "Number", "Index of the term (1-based)"),
];

static NTH_TERM_EXAMPLES: [&str; 2] = [
    "nth_term(2, 3, 10) → 29",
    "nth_term(5, -2, 4) → -1",
];

static NTH_TERM_RELATED: [&str; 2] = ["arithmetic_terms", "closed_form"];

impl FunctionPlugin for NthTerm {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "nth_term",
            description: "Evaluate the closed form for a single term without generating the ones before it",
            usage: "nth_term(first, diff, n)",
            args: &NTH_TERM_ARGS,
            returns: "Number",
            examples: &NTH_TERM_EXAMPLES,
            category: "sequence/arithmetic",
            related: &NTH_TERM_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = expect_args("nth_term", args, 3) {
            return Value::Error(e);
        }

        let first = match extract_number(&args[0], "first") {
            Ok(n) => n,
            Err(e) => return Value::Error(e.in_function("nth_term")),
        };

        let diff = match extract_number(&args[1], "diff") {
            Ok(n) => n,
            Err(e) => return Value::Error(e.in_function("nth_term")),
        };

        // A single evaluation is cheap, so no term limit applies
        let index = match extract_count(&args[2], "n", "nth_term", usize::MAX) {
            Ok(i) => i,
            Err(e) => return Value::Error(e),
        };

        match SequenceExplainer::nth_term(&first, &diff, index) {
            Ok(term) => Value::Number(term.value),
            Err(e) => Value::Error(ArithError::from(e).in_function("nth_term")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_ctx() -> EvalContext {
        EvalContext::new()
    }

    fn nums(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| Value::Number(Number::from_i64(*v))).collect()
    }

    #[test]
    fn test_arithmetic_terms() {
        let result = ArithmeticTerms.call(&nums(&[2, 3, 10]), &eval_ctx());
        let list = result.as_list().unwrap();
        assert_eq!(list.len(), 10);
        let tenth = &list[9];
        assert_eq!(tenth.get("index").as_number().unwrap().to_i64(), Some(10));
        assert_eq!(tenth.get("value").as_number().unwrap().to_i64(), Some(29));
        assert_eq!(tenth.get("pattern").as_text(), Some("a + 9b"));
        assert_eq!(tenth.get("explanation").as_text(), Some("U_10 = 2 + (9 × 3) = 29"));
    }

    #[test]
    fn test_arithmetic_terms_zero_count() {
        let result = ArithmeticTerms.call(&nums(&[2, 3, 0]), &eval_ctx());
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::INVALID_PARAMETER);
        assert_eq!(err.context.as_ref().and_then(|c| c.function.as_deref()), Some("arithmetic_terms"));
    }

    #[test]
    fn test_arithmetic_terms_respects_max_terms() {
        let ctx = eval_ctx().with_max_terms(5);
        let result = ArithmeticTerms.call(&nums(&[1, 1, 6]), &ctx);
        assert_eq!(result.as_error().unwrap().code, codes::INVALID_PARAMETER);
    }

    #[test]
    fn test_arithmetic_values() {
        let result = Arithmetic.call(&nums(&[5, 3, 4]), &eval_ctx());
        let list = result.as_list().unwrap();
        let values: Vec<Option<i64>> = list.iter().map(|v| v.as_number().and_then(|n| n.to_i64())).collect();
        assert_eq!(values, vec![Some(5), Some(8), Some(11), Some(14)]);
    }

    #[test]
    fn test_arithmetic_decimal_difference() {
        let args = vec![
            Value::Number(Number::from_i64(1)),
            Value::Number(Number::from_str("0.5").unwrap()),
            Value::Number(Number::from_i64(3)),
        ];
        let result = Arithmetic.call(&args, &eval_ctx());
        let rendered: Vec<String> = result.as_list().unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["1", "1.5", "2"]);
    }

    #[test]
    fn test_arithmetic_wrong_arg_count() {
        let result = Arithmetic.call(&nums(&[1, 2]), &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);
    }

    #[test]
    fn test_arithmetic_text_argument() {
        let args = vec![Value::from("two"), Value::from(3), Value::from(4)];
        let result = Arithmetic.call(&args, &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);
    }

    #[test]
    fn test_nth_term() {
        let result = NthTerm.call(&nums(&[2, 3, 10]), &eval_ctx());
        assert_eq!(result.as_number().unwrap().to_i64(), Some(29));
        let negative = NthTerm.call(&nums(&[5, -2, 4]), &eval_ctx());
        assert_eq!(negative.as_number().unwrap().to_i64(), Some(-1));
    }

    #[test]
    fn test_nth_term_index_zero() {
        let result = NthTerm.call(&nums(&[2, 3, 0]), &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INVALID_PARAMETER);
    }
}
