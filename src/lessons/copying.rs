//! Lesson 7: what each kind of copy actually copies.
//!
//! Rules: assignment never copies; a shallow copy copies one level; nested
//! containers stay shared in a shallow copy; only a deep copy isolates.

use crate::copy::{deep_copy, no_copy, shallow_copy, shallow_copy_slice};
use crate::error::{LessonError, Result};
use crate::report::Report;
use crate::value::{ListRef, Value, ValueKind};

/// `[[1, 2], [3, 4]]`, the structure every rule is shown on.
pub fn nested_sample() -> Value {
    Value::list([Value::list([1, 2]), Value::list([3, 4])])
}

fn as_list(value: &Value) -> Result<&ListRef> {
    value
        .as_list()
        .ok_or_else(|| LessonError::type_mismatch(ValueKind::Sequence, value.kind()))
}

/// `value[row][col] = item`.
pub fn set_nested(value: &Value, row: isize, col: isize, item: impl Into<Value>) -> Result<()> {
    let outer = as_list(value)?;
    let len = outer.len();
    let inner = outer
        .get(row)
        .ok_or_else(|| LessonError::out_of_range(row, len))?;
    as_list(&inner)?.set(col, item.into())
}

/// `value[row][col]`.
pub fn get_nested(value: &Value, row: isize, col: isize) -> Option<Value> {
    value.as_list()?.get(row)?.as_list()?.get(col)
}

pub fn walkthrough(report: &mut Report) {
    report.section("Copy behavior");

    let outcome = (|| -> Result<()> {
        let original = nested_sample();
        let assigned = no_copy(&original);
        set_nested(&assigned, 0, 0, 99)?;
        report.check("assignment: the original sees 99", get_nested(&original, 0, 0) == Some(Value::from(99)));

        let original = nested_sample();
        let shallow = shallow_copy(&original);
        set_nested(&shallow, 0, 0, 99)?;
        report.check("shallow copy: the inner list is shared", get_nested(&original, 0, 0) == Some(Value::from(99)));
        as_list(&shallow)?.append(Value::list([5, 6]));
        report.check("shallow copy: the outer list is not", as_list(&original)?.len() == 2);

        let original = nested_sample();
        let sliced = Value::List(shallow_copy_slice(as_list(&original)?));
        set_nested(&sliced, 1, 1, 88)?;
        report.check("slice copy behaves like a shallow copy", get_nested(&original, 1, 1) == Some(Value::from(88)));

        let original = nested_sample();
        let deep = deep_copy(&original);
        set_nested(&deep, 0, 0, 99)?;
        report.show("original after deep copy write", &original);
        report.show("deep copy", &deep);
        report.check("deep copy: fully independent", get_nested(&original, 0, 0) == Some(Value::from(1)));
        Ok(())
    })();

    if let Err(error) = outcome {
        report.check(format!("copy walkthrough failed: {error}"), false);
    }
    report.note("Flat lists of numbers: shallow is enough. Nested data: go deep.");
}
