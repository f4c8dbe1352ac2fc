//! Argument extraction for the plugin functions

use arith_core::{ArithError, Number, Value};

/// Extract a single number from argument
pub fn extract_number(arg: &Value, name: &str) -> Result<Number, ArithError> {
    match arg {
        Value::Number(n) => Ok(n.clone()),
        Value::Error(e) => Err(e.clone()),
        other => Err(ArithError::arg_type("", name, "Number", other.type_name())),
    }
}

/// Extract a whole-number count or index.
///
/// Only the shape is checked here. Whether the value is at least one is
/// decided by the explainer so that the rule lives in one place; the
/// upper bound protects callers that pass the count straight through.
pub fn extract_count(arg: &Value, name: &'static str, func: &str, max: usize) -> Result<i64, ArithError> {
    let n = extract_number(arg, name).map_err(|e| e.in_function(func))?;
    if !n.is_integer() {
        return Err(ArithError::invalid_parameter(name, format!("must be a whole number, got {}", n))
            .in_function(func));
    }
    let count = n.to_i64().ok_or_else(|| {
        ArithError::invalid_parameter(name, format!("{} is out of range", n)).in_function(func)
    })?;
    if usize::try_from(count).map_or(false, |c| c > max) {
        return Err(ArithError::invalid_parameter(
            name,
            format!("{}() limited to {} terms, got {}", func, max, count),
        )
        .in_function(func));
    }
    Ok(count)
}

/// Check the argument count of a call
pub fn expect_args(func: &str, args: &[Value], expected: usize) -> Result<(), ArithError> {
    if args.len() != expected {
        return Err(ArithError::arg_count(func, expected, args.len()));
    }
    Ok(())
}
