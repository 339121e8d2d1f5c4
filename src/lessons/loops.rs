//! Lesson 10: loop styles for lists and dictionaries.
//!
//! Each function is one loop shape. They all compute something small so
//! the shapes can be compared by result.

use indexmap::IndexMap;

use crate::error::{LessonError, Result};
use crate::report::Report;
use crate::value::{ListRef, Value};

// =============================================================================
// Lists
// =============================================================================

/// `for item in items`: the default when the index does not matter.
pub fn sum_for_each(items: &[i64]) -> Result<i64> {
    let mut total: i64 = 0;
    for &item in items {
        total = total
            .checked_add(item)
            .ok_or_else(|| LessonError::overflow("sum_for_each"))?;
    }
    Ok(total)
}

/// Index-based access. Only worth it when the index itself matters.
#[allow(clippy::needless_range_loop)]
pub fn collect_by_index(items: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(items.len());
    for i in 0..items.len() {
        out.push(items[i]);
    }
    out
}

pub fn enumerate_pairs<T: Clone>(items: &[T]) -> Vec<(usize, T)> {
    items.iter().cloned().enumerate().collect()
}

pub fn collect_with_while(items: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(items.len());
    let mut i = 0;
    while i < items.len() {
        out.push(items[i]);
        i += 1;
    }
    out
}

pub fn reversed_items(items: &[i64]) -> Vec<i64> {
    items.iter().rev().copied().collect()
}

/// The same as [`reversed_items`], walking the indexes down by hand.
#[allow(clippy::needless_range_loop)]
pub fn reversed_by_index(items: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(items.len());
    for i in (0..items.len()).rev() {
        out.push(items[i]);
    }
    out
}

pub fn above_threshold(items: &[i64], threshold: i64) -> Vec<i64> {
    let mut out = Vec::new();
    for &item in items {
        if item > threshold {
            out.push(item);
        }
    }
    out
}

/// Row by row, cell by cell.
pub fn flatten_matrix<R: AsRef<[i64]>>(matrix: &[R]) -> Vec<i64> {
    let mut cells = Vec::new();
    for row in matrix {
        for &cell in row.as_ref() {
            cells.push(cell);
        }
    }
    cells
}

// =============================================================================
// Dictionaries
// =============================================================================

pub fn keys_in_order(data: &IndexMap<String, i64>) -> Vec<String> {
    data.keys().cloned().collect()
}

pub fn sum_values(data: &IndexMap<String, i64>) -> Result<i64> {
    data.values()
        .try_fold(0i64, |acc, &value| acc.checked_add(value))
        .ok_or_else(|| LessonError::overflow("sum_values"))
}

pub fn format_items(data: &IndexMap<String, i64>) -> Vec<String> {
    data.iter().map(|(key, value)| format!("{key}={value}")).collect()
}

pub fn items_above(data: &IndexMap<String, i64>, threshold: i64) -> Vec<(String, i64)> {
    data.iter()
        .filter(|&(_, &value)| value > threshold)
        .map(|(key, &value)| (key.clone(), value))
        .collect()
}

/// `(outer key, inner key, value)` for every leaf.
pub fn nested_items(data: &IndexMap<String, IndexMap<String, i64>>) -> Vec<(String, String, i64)> {
    let mut out = Vec::new();
    for (key, inner) in data {
        for (inner_key, &value) in inner {
            out.push((key.clone(), inner_key.clone(), value));
        }
    }
    out
}

// =============================================================================
// Loop control
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    Found(usize),
    /// The loop ran to the end without breaking.
    Exhausted,
}

/// `break` out as soon as `target` turns up; the fallback only runs when the
/// loop finished on its own.
pub fn search(items: &[i64], target: i64) -> Search {
    'search: {
        for (i, &item) in items.iter().enumerate() {
            if item == target {
                break 'search Search::Found(i);
            }
        }
        Search::Exhausted
    }
}

/// `continue` past negative values.
pub fn sum_skipping_negatives(items: &[i64]) -> Result<i64> {
    let mut total: i64 = 0;
    for &item in items {
        if item < 0 {
            continue;
        }
        total = total
            .checked_add(item)
            .ok_or_else(|| LessonError::overflow("sum_skipping_negatives"))?;
    }
    Ok(total)
}

// =============================================================================
// Removing while looping
// =============================================================================
//
// Holding `list.borrow()` across a loop and calling `list.remove(..)` inside
// it would panic on the second borrow. These are the ways that work.

pub fn remove_in_place(list: &ListRef, unwanted: &Value) -> usize {
    let before = list.len();
    list.borrow_mut().retain(|item| item != unwanted);
    before - list.len()
}

pub fn without(list: &ListRef, unwanted: &Value) -> ListRef {
    let mut kept = Vec::new();
    for item in list.borrow().iter() {
        if item != unwanted {
            kept.push(item.clone());
        }
    }
    ListRef::from_vec(kept)
}

/// Loops over a snapshot so the list itself is free to change.
pub fn remove_over_copy(list: &ListRef, unwanted: &Value) -> usize {
    let mut removed = 0;
    for item in list.snapshot() {
        if item == *unwanted {
            list.remove(&item);
            removed += 1;
        }
    }
    removed
}

pub fn walkthrough(report: &mut Report) {
    report.section("Loops");

    let items = [10, 20, 30];
    report.check("for-each sum = 60", matches!(sum_for_each(&items), Ok(60)));
    report.check(
        "index, while and for-each agree",
        collect_by_index(&items) == items && collect_with_while(&items) == items,
    );
    report.check("enumerate pairs index with value", enumerate_pairs(&items)[1] == (1, 20));
    report.check("both reverse loops agree", reversed_items(&items) == reversed_by_index(&items));
    report.check("filtered loop keeps 20 and 30", above_threshold(&items, 15) == [20, 30]);
    report.check("nested loop visits every cell", flatten_matrix(&[[1, 2], [3, 4]]) == [1, 2, 3, 4]);

    let data: IndexMap<String, i64> = [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
    report.show("items", format_items(&data).join(", "));
    report.check("keys come in insertion order", keys_in_order(&data) == ["a", "b"]);
    report.check("values sum to 3", matches!(sum_values(&data), Ok(3)));

    report.check("break finds 20 at 1", search(&items, 20) == Search::Found(1));
    report.check("no break runs the fallback", search(&items, 99) == Search::Exhausted);
    report.check("continue skips negatives", matches!(sum_skipping_negatives(&[1, -2, 3]), Ok(4)));

    let list = ListRef::from_vec(vec![Value::from(1), Value::from(2), Value::from(1)]);
    let filtered = without(&list, &Value::from(1));
    report.check("building a new list leaves the old one alone", list.len() == 3 && filtered.len() == 1);
    report.check("looping over a copy removes both", remove_over_copy(&list, &Value::from(1)) == 2);
    report.note("Never remove from the list you are looping over.");
}
