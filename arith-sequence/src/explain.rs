//! Explanation functions
//!
//! closed_form, worked_example, derivation

use arith_plugin::prelude::*;
use crate::explainer::SequenceExplainer;
use crate::helpers::{expect_args, extract_count, extract_number};
use crate::narrative::{derivation_steps, WorkedExample, MULTIPLIER_HINT, REFLECTION_PROMPT};
use crate::term::SequenceParameters;
use std::collections::BTreeMap;

// ============ ClosedFormFn ============

pub struct ClosedFormFn;

static CLOSED_FORM_EXAMPLES: [&str; 1] = ["closed_form() → \"U_n = a + (n - 1)b\""];

static CLOSED_FORM_RELATED: [&str; 2] = ["nth_term", "worked_example"];

impl FunctionPlugin for ClosedFormFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "closed_form",
            description: "General rule for the n-th term of an arithmetic sequence",
            usage: "closed_form()",
            args: &[],
            returns: "Text",
            examples: &CLOSED_FORM_EXAMPLES,
            category: "sequence/explain",
            related: &CLOSED_FORM_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = expect_args("closed_form", args, 0) {
            return Value::Error(e);
        }
        Value::Text(SequenceExplainer::closed_form().symbolic.to_string())
    }
}

// ============ WorkedExampleFn ============

pub struct WorkedExampleFn;

static WORKED_EXAMPLE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("first", "Number", "First term a"),
    ArgMeta::required("diff", "Number", "Common difference b"),
    ArgMeta::required("count", "Number", "Term n to check by hand (at least 1)"),
];

static WORKED_EXAMPLE_EXAMPLES: [&str; 1] = [
    "worked_example(2, 3, 10) → {computation: \"2 + (10 - 1) × 3 = 29\", value: 29, ...}",
];

static WORKED_EXAMPLE_RELATED: [&str; 2] = ["closed_form", "derivation"];

impl FunctionPlugin for WorkedExampleFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "worked_example",
            description: "Closed form applied by hand to the last term, with the derivation that leads to it",
            usage: "worked_example(first, diff, count)",
            args: &WORKED_EXAMPLE_ARGS,
            returns: "Object",
            examples: &WORKED_EXAMPLE_EXAMPLES,
            category: "sequence/explain",
            related: &WORKED_EXAMPLE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        match worked_example(args, ctx) {
            Ok(v) => v,
            Err(e) => Value::Error(e.in_function("worked_example")),
        }
    }
}

fn worked_example(args: &[Value], ctx: &EvalContext) -> Result<Value, ArithError> {
    expect_args("worked_example", args, 3)?;
    let first = extract_number(&args[0], "first")?;
    let diff = extract_number(&args[1], "diff")?;
    let count = extract_count(&args[2], "count", "worked_example", ctx.max_terms)?;

    let seq = SequenceExplainer::generate(SequenceParameters::new(first, diff, count))?;
    let example = WorkedExample::from_sequence(&seq)
        .ok_or_else(|| ArithError::internal("generated sequence is empty"))?;

    let form = SequenceExplainer::closed_form();
    let mut obj = BTreeMap::new();
    obj.insert("closed_form".to_string(), Value::Text(form.symbolic.to_string()));
    obj.insert("description".to_string(), Value::Text(form.description.to_string()));
    obj.insert("first_term".to_string(), Value::Number(example.first_term.clone()));
    obj.insert("common_difference".to_string(), Value::Number(example.common_difference.clone()));
    obj.insert("term_count".to_string(), Value::from(example.term_count as i64));
    obj.insert("value".to_string(), Value::Number(example.value.clone()));
    obj.insert("computation".to_string(), Value::Text(example.computation.clone()));
    obj.insert("lines".to_string(), Value::List(example.lines().into_iter().map(Value::Text).collect()));
    obj.insert("trend".to_string(), Value::Text(seq.trend().to_string()));
    Ok(Value::Object(obj))
}

// ============ Derivation ============

pub struct Derivation;

static DERIVATION_ARGS: [ArgMeta; 1] = [
    ArgMeta::optional("steps", "Number", "How many rungs of the ladder to show", "4"),
];

static DERIVATION_EXAMPLES: [&str; 1] = [
    "derivation(3) → [\"U_1 = a\", \"U_2 = a + 1·b\", \"U_3 = a + 2·b\", ...]",
];

static DERIVATION_RELATED: [&str; 2] = ["closed_form", "worked_example"];

const DEFAULT_DERIVATION_STEPS: i64 = 4;

impl FunctionPlugin for Derivation {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "derivation",
            description: "Step-by-step ladder from U_1 = a to the closed form, with the reflection question",
            usage: "derivation([steps])",
            args: &DERIVATION_ARGS,
            returns: "List<Text>",
            examples: &DERIVATION_EXAMPLES,
            category: "sequence/explain",
            related: &DERIVATION_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() > 1 {
            return Value::Error(ArithError::arg_count("derivation", 1, args.len()));
        }

        let steps = match args.first() {
            None | Some(Value::Null) => DEFAULT_DERIVATION_STEPS,
            Some(arg) => match extract_count(arg, "steps", "derivation", ctx.max_terms) {
                Ok(n) => n,
                Err(e) => return Value::Error(e),
            },
        };

        if steps < 1 {
            return Value::Error(
                ArithError::invalid_parameter("steps", format!("must be at least 1, got {}", steps))
                    .in_function("derivation"),
            );
        }

        let mut lines: Vec<Value> = derivation_steps(steps as usize).into_iter().map(Value::Text).collect();
        lines.push(Value::Text(REFLECTION_PROMPT.to_string()));
        lines.push(Value::Text(MULTIPLIER_HINT.to_string()));
        lines.push(Value::Text(SequenceExplainer::closed_form().symbolic.to_string()));
        Value::List(lines)
    }
}
