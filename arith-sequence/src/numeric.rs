//! Numeric types a sequence can be generated over
//!
//! The arithmetic follows the input type: machine integers stay exact
//! (and refuse to wrap), floats use IEEE-754 semantics without extra
//! rounding, and `Number` is exact decimal arithmetic.

use arith_core::Number;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A value usable as first term, common difference and term value.
pub trait TermNumber: Clone + PartialOrd + Debug {
    /// `first + multiplier * diff`, or `None` if it cannot be represented.
    fn term(first: &Self, diff: &Self, multiplier: usize) -> Option<Self>;

    /// Sign relative to zero.
    fn sign(&self) -> Ordering;

    /// Whether the value can take part in arithmetic at all.
    fn is_finite(&self) -> bool {
        true
    }

    /// Plain rendering for explanation strings.
    fn render(&self) -> String;

    fn to_number(&self) -> Number;

    /// Rendering as an operand after `+`: negatives get parentheses.
    fn render_operand(&self) -> String {
        if self.sign() == Ordering::Less {
            format!("({})", self.render())
        } else {
            self.render()
        }
    }
}

impl TermNumber for i64 {
    fn term(first: &Self, diff: &Self, multiplier: usize) -> Option<Self> {
        let k = i64::try_from(multiplier).ok()?;
        k.checked_mul(*diff)?.checked_add(*first)
    }

    fn sign(&self) -> Ordering {
        self.cmp(&0)
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_number(&self) -> Number {
        Number::from_i64(*self)
    }
}

impl TermNumber for f64 {
    fn term(first: &Self, diff: &Self, multiplier: usize) -> Option<Self> {
        let value = first + (multiplier as f64) * diff;
        value.is_finite().then_some(value)
    }

    fn sign(&self) -> Ordering {
        self.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn render(&self) -> String {
        // -0.0 prints as "-0"
        if *self == 0.0 {
            "0".to_string()
        } else {
            self.to_string()
        }
    }

    fn to_number(&self) -> Number {
        Number::from_f64(*self)
    }
}

impl TermNumber for Number {
    fn term(first: &Self, diff: &Self, multiplier: usize) -> Option<Self> {
        let k = Number::from_i64(i64::try_from(multiplier).ok()?);
        Some(first.add(&k.mul(diff)))
    }

    fn sign(&self) -> Ordering {
        if self.is_negative() {
            Ordering::Less
        } else if self.is_zero() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_number(&self) -> Number {
        self.clone()
    }
}
