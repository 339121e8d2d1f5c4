//! Names bound to values.
//!
//! `b = a` copies the reference, never the value. What happens next depends
//! on the value: rebinding `a` to a new value leaves `b` where it was, while
//! mutating the container both names point at is visible through both.

use indexmap::IndexMap;

use crate::error::{LessonError, Result};
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Bindings {
    names: IndexMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds (or rebinds) `name`. The previously bound value is returned and
    /// is never modified.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.names.insert(name.into(), value.into())
    }

    /// `new = existing`: both names now reference the same value.
    pub fn alias(&mut self, new: impl Into<String>, existing: &str) -> Result<()> {
        let value = self.lookup(existing)?.clone();
        self.names.insert(new.into(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Value> {
        self.names
            .get(name)
            .ok_or_else(|| LessonError::UnboundName(name.to_string()))
    }

    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.names.shift_remove(name)
    }

    pub fn same_object(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.lookup(a)?.is(self.lookup(b)?))
    }

    /// Type of whatever `name` currently points at.
    pub fn type_of(&self, name: &str) -> Result<String> {
        Ok(self.lookup(name)?.type_name())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
