//! Lesson 8.1: dictionary methods on [`DictRef`].

use crate::report::Report;
use crate::value::{DictRef, Value};

impl DictRef {
    // =========================================================================
    // Access
    // =========================================================================

    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| default.into())
    }

    // =========================================================================
    // Add / update
    // =========================================================================

    /// Merges `other` into this dict. Existing keys keep their position and
    /// take the new value.
    pub fn update(&self, other: &DictRef) -> &Self {
        let entries: Vec<(String, Value)> = other
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.borrow_mut().extend(entries);
        self
    }

    /// The value under `key`, inserting `default` first when it is missing.
    pub fn setdefault(&self, key: impl Into<String>, default: impl Into<Value>) -> Value {
        self.borrow_mut()
            .entry(key.into())
            .or_insert_with(|| default.into())
            .clone()
    }

    // =========================================================================
    // Remove
    // =========================================================================

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.borrow_mut().shift_remove(key)
    }

    pub fn clear(&self) -> &Self {
        self.borrow_mut().clear();
        self
    }

    // =========================================================================
    // Inspect
    // =========================================================================

    pub fn keys(&self) -> Vec<String> {
        self.borrow().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.borrow().values().cloned().collect()
    }

    pub fn items(&self) -> Vec<(String, Value)> {
        self.borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.borrow().contains_key(key)
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

pub fn walkthrough(report: &mut Report) {
    report.section("Dictionary methods");

    let d = DictRef::new();
    d.insert("a", 1);
    report.check("get('a') = 1", d.get("a") == Some(Value::from(1)));
    report.check("get('x') is None", d.get("x").is_none());
    report.check("get_or('x', 0) = 0", d.get_or("x", 0) == Value::from(0));

    let extra = Value::dict([("b", 2)]);
    if let Some(extra) = extra.as_dict() {
        d.update(extra);
    }
    report.show("after update", Value::Dict(d.clone()));
    report.check("update merges", Value::Dict(d.clone()) == Value::dict([("a", 1), ("b", 2)]));

    report.check("setdefault keeps an existing value", d.setdefault("a", 100) == Value::from(1));
    report.check("setdefault inserts a missing one", d.setdefault("c", 200) == Value::from(200));

    report.check("remove('a') = 1", d.remove("a") == Some(Value::from(1)));
    report.check("remove('x') is None", d.remove("x").is_none());
    report.check("keys keep insertion order", d.keys() == ["b", "c"]);
    report.check("cleared dict is falsy", !d.clear().is_truthy());
}
