//! Lesson 8.2: filter, map and reduce over dictionaries.
//!
//! Flat score tables are plain `IndexMap<String, i64>`. Nested records are
//! dynamic, so they go through [`DictRef`] and a wrong shape is an error.

use indexmap::IndexMap;
use serde_json::json;

use crate::error::{LessonError, Result};
use crate::report::Report;
use crate::value::{DictRef, Value, ValueKind};

pub type Scores = IndexMap<String, i64>;

// =============================================================================
// Flat dictionaries
// =============================================================================

pub fn filter_by_value_greater_than(data: &Scores, threshold: i64) -> Scores {
    data.iter()
        .filter(|&(_, &v)| v > threshold)
        .map(|(k, &v)| (k.clone(), v))
        .collect()
}

pub fn filter_by_key_startswith(data: &Scores, prefix: &str) -> Scores {
    data.iter()
        .filter(|(k, _)| k.starts_with(prefix))
        .map(|(k, &v)| (k.clone(), v))
        .collect()
}

fn doubled(value: i64, operation: &'static str) -> Result<i64> {
    value
        .checked_mul(2)
        .ok_or_else(|| LessonError::overflow(operation))
}

pub fn map_values_double(data: &Scores) -> Result<Scores> {
    data.iter()
        .map(|(k, &v)| doubled(v, "map_values_double").map(|d| (k.clone(), d)))
        .collect()
}

/// Doubles even values, leaves odd ones alone.
pub fn map_values_conditionally(data: &Scores) -> Result<Scores> {
    data.iter()
        .map(|(k, &v)| {
            let mapped = if v % 2 == 0 {
                doubled(v, "map_values_conditionally")
            } else {
                Ok(v)
            };
            mapped.map(|m| (k.clone(), m))
        })
        .collect()
}

pub fn reduce_sum_of_values(data: &Scores) -> Result<i64> {
    data.values()
        .try_fold(0i64, |acc, &v| acc.checked_add(v))
        .ok_or_else(|| LessonError::overflow("reduce_sum_of_values"))
}

pub fn any_value_above_threshold(data: &Scores, threshold: i64) -> bool {
    data.values().any(|&v| v > threshold)
}

pub fn all_values_positive(data: &Scores) -> bool {
    data.values().all(|&v| v > 0)
}

/// Key of the largest value; the first one wins a tie.
pub fn find_max_value_key(data: &Scores) -> Option<&str> {
    data.iter()
        .reduce(|best, item| if item.1 > best.1 { item } else { best })
        .map(|(k, _)| k.as_str())
}

// =============================================================================
// Nested dictionaries
// =============================================================================

fn inner_dict(value: &Value) -> Result<&DictRef> {
    value
        .as_dict()
        .ok_or_else(|| LessonError::type_mismatch(ValueKind::Mapping, value.kind()))
}

/// Keeps the records whose `score` is above `threshold`. A record without
/// a score counts as scoring 0.
pub fn filter_nested_dictionary(data: &DictRef, threshold: i64) -> Result<DictRef> {
    let kept = DictRef::new();
    for (key, record) in data.borrow().iter() {
        let score = inner_dict(record)?.get_or("score", 0);
        let score = score
            .as_f64()
            .ok_or_else(|| LessonError::type_mismatch(ValueKind::Number, score.kind()))?;
        if score > threshold as f64 {
            kept.insert(key.clone(), record.clone());
        }
    }
    Ok(kept)
}

/// Total number of keys one level down. Non-dictionary values add nothing.
pub fn count_nested_keys(data: &DictRef) -> usize {
    data.borrow()
        .values()
        .filter_map(Value::as_dict)
        .map(DictRef::len)
        .sum()
}

/// `{"user": {"id": 1}}` becomes `{"user.id": 1}`.
pub fn flatten_nested_dictionary(data: &DictRef) -> Result<DictRef> {
    let flat = DictRef::new();
    for (parent, inner) in data.borrow().iter() {
        for (child, value) in inner_dict(inner)?.borrow().iter() {
            flat.insert(format!("{parent}.{child}"), value.clone());
        }
    }
    Ok(flat)
}

/// Inverse of [`flatten_nested_dictionary`]: splits each key at its first
/// dot.
pub fn unflatten_dictionary(data: &DictRef) -> Result<DictRef> {
    let nested = DictRef::new();
    for (key, value) in data.borrow().iter() {
        let (parent, child) = key
            .split_once('.')
            .ok_or_else(|| LessonError::MalformedKey(key.clone()))?;
        let inner = nested.setdefault(parent, DictRef::new());
        inner_dict(&inner)?.insert(child, value.clone());
    }
    Ok(nested)
}

pub fn walkthrough(report: &mut Report) {
    report.section("Functional dictionary helpers");

    let scores: Scores = [("a", 10), ("b", 50), ("c", 20)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    report.show("scores", format!("{:?}", scores));
    report.check("values > 15 keeps b and c", filter_by_value_greater_than(&scores, 15).len() == 2);
    report.check("sum of values = 80", matches!(reduce_sum_of_values(&scores), Ok(80)));
    report.check("max key is b", find_max_value_key(&scores) == Some("b"));
    report.check("max key of {} is None", find_max_value_key(&Scores::new()).is_none());

    let records = Value::from_json(json!({
        "user": {"id": 1, "name": "Raj"},
        "meta": {"active": true}
    }));
    let Some(records) = records.as_dict() else {
        return;
    };
    report.check("three nested keys", count_nested_keys(records) == 3);

    match flatten_nested_dictionary(records) {
        Ok(flat) => {
            report.show("flattened", Value::Dict(flat.clone()));
            let restored = unflatten_dictionary(&flat);
            report.check(
                "unflatten restores the original",
                restored.is_ok_and(|restored| restored == *records),
            );
        }
        Err(error) => {
            report.check(format!("flatten failed: {error}"), false);
        }
    }

    let broken = Value::dict([("user", 5)]);
    if let Some(broken) = broken.as_dict() {
        report.check("flattening a non-dictionary fails", flatten_nested_dictionary(broken).is_err());
    }
}
