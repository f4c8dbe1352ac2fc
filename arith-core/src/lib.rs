//! Arith Core - Fundamental types
//!
//! This crate provides the core types used throughout Arith:
//! - `Number`: Arbitrary precision decimal numbers
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `ArithError`: Structured errors for protocol clients

mod number;
mod value;
mod error;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use value::Value;
pub use error::{ArithError, ErrorContext, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, Value, ArithError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
        }

        #[test]
        fn test_from_str_integer() {
            let n = Number::from_str("123").unwrap();
            assert_eq!(n.to_i64(), Some(123));
        }

        #[test]
        fn test_from_str_decimal() {
            let n = Number::from_str("3.14").unwrap();
            assert!(!n.is_integer());
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("1/3").unwrap();
            assert!(!n.is_integer());
        }

        #[test]
        fn test_from_str_fraction_zero_denominator() {
            assert!(matches!(Number::from_str("1/0"), Err(NumberError::DivisionByZero)));
        }

        #[test]
        fn test_from_str_scientific() {
            let n = Number::from_str("1.5e2").unwrap();
            assert_eq!(n.to_i64(), Some(150));
        }

        #[test]
        fn test_from_str_garbage() {
            assert!(Number::from_str("two").is_err());
        }

        #[test]
        fn test_add_mul() {
            let a = Number::from_i64(10);
            let b = Number::from_i64(32);
            assert_eq!(a.add(&b).to_i64(), Some(42));
            assert_eq!(Number::from_i64(6).mul(&Number::from_i64(7)).to_i64(), Some(42));
        }

        #[test]
        fn test_decimal_addition_is_exact() {
            let a = Number::from_str("0.1").unwrap();
            let b = Number::from_str("0.2").unwrap();
            assert_eq!(a.add(&b).to_string(), "0.3");
        }

        #[test]
        fn test_predicates() {
            assert!(Number::from_i64(0).is_zero());
            assert!(Number::from_i64(-5).is_negative());
            assert!(!Number::from_i64(0).is_negative());
        }

        #[test]
        fn test_ordering() {
            let small = Number::from_i64(-1);
            let big = Number::from_str("0.5").unwrap();
            assert!(small < big);
            assert_eq!(Number::from_i64(7).cmp(&Number::from_i64(7)), std::cmp::Ordering::Equal);
        }

        #[test]
        fn test_display_integer_has_no_fraction() {
            assert_eq!(Number::from_i64(29).to_string(), "29");
            assert_eq!(Number::from_i64(-1).to_string(), "-1");
        }

        #[test]
        fn test_display_trims_trailing_zeros() {
            assert_eq!(Number::from_str("2.5").unwrap().to_string(), "2.5");
            assert_eq!(Number::from_str("-0.75").unwrap().to_string(), "-0.75");
            assert_eq!(Number::from_str("1.500").unwrap().to_string(), "1.5");
            assert_eq!(Number::from_str("1/4").unwrap().to_string(), "0.25");
        }

        #[test]
        fn test_display_beyond_i64_is_exact() {
            let big = Number::from_str("1000000000000000000000000000000").unwrap();
            assert_eq!(big.to_string(), "1000000000000000000000000000000");
            let next = big.add(&Number::from_i64(1));
            assert_eq!(next.to_string(), "1000000000000000000000000000001");
            assert!(next > big);
            assert_eq!(Number::from_i64(-1).mul(&next).to_string(), "-1000000000000000000000000000001");
        }

        #[test]
        fn test_display_long_decimal_is_exact() {
            let x = Number::from_str("0.123456789012").unwrap();
            let step = Number::from_str("0.000000000001").unwrap();
            assert_eq!(x.to_string(), "0.123456789012");
            assert_eq!(step.to_string(), "0.000000000001");
            assert_eq!(x.add(&step).to_string(), "0.123456789013");
            assert_eq!(Number::from_str("-12.0005").unwrap().to_string(), "-12.0005");
        }

        #[test]
        fn test_display_fraction_keeps_working_digits() {
            let third = Number::from_str("1/3").unwrap().to_string();
            assert!(third.starts_with("0.3333333333333"));
            assert!(third.len() > 40);
        }

        #[test]
        fn test_display_scientific_input() {
            assert_eq!(Number::from_str("15e-3").unwrap().to_string(), "0.015");
            assert_eq!(Number::from_str("602214076e15").unwrap().to_string(), "602214076000000000000000");
        }

        #[test]
        fn test_from_f64() {
            assert_eq!(Number::from_f64(2.5).to_string(), "2.5");
            assert_eq!(Number::from_f64(0.1).to_string(), "0.1");
            assert!(Number::from_f64(f64::NAN).is_zero());
        }

        #[test]
        fn test_from_f64_tiny_values_survive() {
            let tiny = Number::from_f64(1e-20);
            assert!(!tiny.is_zero());
            assert_eq!(tiny.to_string(), "0.00000000000000000001");
            assert_eq!(Number::from_f64(-3.5e-9).to_string(), "-0.0000000035");
        }

        #[test]
        fn test_serde_as_string() {
            let n = Number::from_str("1.25").unwrap();
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, "\"1.25\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), "1.25");
        }

        #[test]
        fn test_serde_round_trip_large_values() {
            let n = Number::from_str("123456789012345678901234567890.000000000007").unwrap();
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, "\"123456789012345678901234567890.000000000007\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back, n);
        }
    }

    mod value_tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_from_i64() {
            let v: Value = 42i64.into();
            assert_eq!(v.as_number().unwrap().to_i64(), Some(42));
        }

        #[test]
        fn test_type_name() {
            assert_eq!(Value::Number(Number::from_i64(0)).type_name(), "Number");
            assert_eq!(Value::Text(String::new()).type_name(), "Text");
            assert_eq!(Value::Bool(true).type_name(), "Bool");
            assert_eq!(Value::Null.type_name(), "Null");
        }

        #[test]
        fn test_as_error() {
            let err = Value::Error(ArithError::div_zero());
            assert_eq!(err.as_error().map(|e| e.code.as_str()), Some(codes::DIV_ZERO));
            assert!(Value::Null.as_error().is_none());
        }

        #[test]
        fn test_get_missing_field() {
            let obj = Value::Object(Default::default());
            let missing = obj.get("value");
            assert_eq!(missing.as_error().unwrap().code, codes::UNDEFINED_FIELD);
        }

        #[test]
        fn test_from_json_numeric_string() {
            let v = Value::from_json(&json!("2.5"));
            assert_eq!(v.as_number().unwrap().to_string(), "2.5");
            let t = Value::from_json(&json!("hello"));
            assert_eq!(t.as_text(), Some("hello"));
        }

        #[test]
        fn test_from_json_float() {
            let v = Value::from_json(&json!(0.5));
            assert_eq!(v.as_number().unwrap().to_string(), "0.5");
        }

        #[test]
        fn test_to_json_object() {
            let mut map = std::collections::BTreeMap::new();
            map.insert("index".to_string(), Value::from(3));
            map.insert("pattern".to_string(), Value::from("a + 2b"));
            let json = Value::Object(map).to_json();
            assert_eq!(json, json!({"index": "3", "pattern": "a + 2b"}));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = ArithError::div_zero();
            assert_eq!(err.code, codes::DIV_ZERO);
            assert_eq!(err.severity, Severity::Error);
        }

        #[test]
        fn test_invalid_parameter_carries_argument() {
            let err = ArithError::invalid_parameter("term_count", "must be at least 1, got 0")
                .in_function("arithmetic_terms");
            assert_eq!(err.code, codes::INVALID_PARAMETER);
            let ctx = err.context.unwrap();
            assert_eq!(ctx.argument.as_deref(), Some("term_count"));
            assert_eq!(ctx.function.as_deref(), Some("arithmetic_terms"));
        }

        #[test]
        fn test_internal_error_is_fatal() {
            let err = ArithError::internal("generated sequence is empty");
            assert_eq!(err.code, codes::INTERNAL);
            assert_eq!(err.severity, Severity::Fatal);
        }

        #[test]
        fn test_error_display() {
            let err = ArithError::parse_error("unexpected token");
            let display = format!("{}", err);
            assert!(display.contains("PARSE_ERROR"));
            assert!(display.contains("suggestion"));
        }

        #[test]
        fn test_number_error_conversion() {
            let err: ArithError = NumberError::DivisionByZero.into();
            assert_eq!(err.code, codes::DIV_ZERO);
            let err: ArithError = NumberError::ParseError("two".to_string()).into();
            assert_eq!(err.code, codes::PARSE_ERROR);
        }
    }
}
