//! Lesson 2: branching on values of different kinds.
//!
//! Each check answers with a category instead of failing on the wrong kind of
//! input; the wrong kind is just another category.

use std::fmt;

use crate::report::Report;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCheck {
    Valid,
    Empty,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCheck {
    Positive,
    Zero,
    Negative,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCheck {
    Empty,
    SingleItem,
    MultipleItems,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truthiness {
    Truthy,
    Falsy,
}

impl TextCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextCheck::Valid => "valid",
            TextCheck::Empty => "empty",
            TextCheck::Invalid => "invalid",
        }
    }
}

impl NumberCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberCheck::Positive => "positive",
            NumberCheck::Zero => "zero",
            NumberCheck::Negative => "negative",
            NumberCheck::Invalid => "invalid",
        }
    }
}

impl ListCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListCheck::Empty => "empty",
            ListCheck::SingleItem => "single_item",
            ListCheck::MultipleItems => "multiple_items",
            ListCheck::Invalid => "invalid",
        }
    }
}

impl Truthiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Truthiness::Truthy => "truthy",
            Truthiness::Falsy => "falsy",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(TextCheck, NumberCheck, ListCheck, Truthiness);

// =============================================================================
// Checks
// =============================================================================

pub fn check_string(value: &Value) -> TextCheck {
    match value {
        Value::Str(s) if s.is_empty() => TextCheck::Empty,
        Value::Str(_) => TextCheck::Valid,
        _ => TextCheck::Invalid,
    }
}

/// Booleans are not numbers here, and NaN has no sign.
pub fn check_number(value: &Value) -> NumberCheck {
    let n = match value {
        Value::Int(n) => *n as f64,
        Value::Float(x) if !x.is_nan() => *x,
        _ => return NumberCheck::Invalid,
    };
    if n > 0.0 {
        NumberCheck::Positive
    } else if n == 0.0 {
        NumberCheck::Zero
    } else {
        NumberCheck::Negative
    }
}

pub fn check_list(value: &Value) -> ListCheck {
    match value {
        Value::List(list) => match list.len() {
            0 => ListCheck::Empty,
            1 => ListCheck::SingleItem,
            _ => ListCheck::MultipleItems,
        },
        _ => ListCheck::Invalid,
    }
}

pub fn check_common(value: &Value) -> Truthiness {
    if value.is_truthy() {
        Truthiness::Truthy
    } else {
        Truthiness::Falsy
    }
}

pub fn walkthrough(report: &mut Report) {
    report.section("Conditions");

    for (input, expected) in [
        (Value::from("Rust"), TextCheck::Valid),
        (Value::from(""), TextCheck::Empty),
        (Value::None, TextCheck::Invalid),
        (Value::from(123), TextCheck::Invalid),
    ] {
        let got = check_string(&input);
        report.check(format!("check_string({input}) = {got}"), got == expected);
    }

    for (input, expected) in [
        (Value::from(10), NumberCheck::Positive),
        (Value::from(0), NumberCheck::Zero),
        (Value::from(-5), NumberCheck::Negative),
        (Value::from("10"), NumberCheck::Invalid),
    ] {
        let got = check_number(&input);
        report.check(format!("check_number({input}) = {got}"), got == expected);
    }

    for (input, expected) in [
        (Value::list(Vec::<Value>::new()), ListCheck::Empty),
        (Value::list([1]), ListCheck::SingleItem),
        (Value::list([1, 2, 3]), ListCheck::MultipleItems),
        (Value::from("not a list"), ListCheck::Invalid),
    ] {
        let got = check_list(&input);
        report.check(format!("check_list({input}) = {got}"), got == expected);
    }

    for (input, expected) in [
        (Value::from("data"), Truthiness::Truthy),
        (Value::list([1]), Truthiness::Truthy),
        (Value::None, Truthiness::Falsy),
        (Value::from(""), Truthiness::Falsy),
        (Value::from(0), Truthiness::Falsy),
    ] {
        let got = check_common(&input);
        report.check(format!("check_common({input}) = {got}"), got == expected);
    }
}
