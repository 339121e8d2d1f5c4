//! Lesson 5.1: list methods.
//!
//! The methods live on [`ListRef`], so every call mutates the one shared list
//! and every alias sees the result. Mutating methods hand back `&Self` so calls
//! chain the way the original list methods read.

use std::cmp::Ordering;

use crate::error::{LessonError, Result};
use crate::report::Report;
use crate::value::{normalize_index, ListRef, Value};

/// Ordering between two values of the same orderable kind.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Some(x.total_cmp(&y)),
            _ => None,
        },
    }
}

impl ListRef {
    // =========================================================================
    // Adding elements
    // =========================================================================

    pub fn append(&self, item: impl Into<Value>) -> &Self {
        self.borrow_mut().push(item.into());
        self
    }

    pub fn extend<I, T>(&self, items: I) -> &Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();
        self.borrow_mut().extend(items);
        self
    }

    /// Inserts before `index`; indexes past either end are clamped.
    pub fn insert(&self, index: isize, item: impl Into<Value>) -> &Self {
        let mut items = self.borrow_mut();
        let len = items.len() as isize;
        let at = if index < 0 { (index + len).max(0) } else { index.min(len) };
        items.insert(at as usize, item.into());
        drop(items);
        self
    }

    // =========================================================================
    // Removing elements
    // =========================================================================

    /// Removes the first element equal to `item`; absent items are ignored.
    pub fn remove(&self, item: &Value) -> &Self {
        let position = self.borrow().iter().position(|v| v == item);
        if let Some(i) = position {
            self.borrow_mut().remove(i);
        }
        self
    }

    /// Removes and returns the last element, or the one at `index`.
    pub fn pop(&self, index: Option<isize>) -> Option<Value> {
        let mut items = self.borrow_mut();
        match index {
            None => items.pop(),
            Some(index) => normalize_index(index, items.len()).map(|i| items.remove(i)),
        }
    }

    pub fn clear(&self) -> &Self {
        self.borrow_mut().clear();
        self
    }

    // =========================================================================
    // Searching & checking
    // =========================================================================

    pub fn index_of(&self, item: &Value) -> Option<usize> {
        self.borrow().iter().position(|v| v == item)
    }

    pub fn count(&self, item: &Value) -> usize {
        self.borrow().iter().filter(|v| *v == item).count()
    }

    pub fn contains(&self, item: &Value) -> bool {
        self.index_of(item).is_some()
    }

    // =========================================================================
    // Ordering & copying
    // =========================================================================

    /// Sorts numbers or text in place. Mixing kinds (or sorting containers)
    /// fails and leaves the list untouched.
    pub fn sort(&self) -> Result<&Self> {
        let mut items = self.borrow_mut();
        if let Some(pair) = items.windows(2).find(|w| compare(&w[0], &w[1]).is_none()) {
            return Err(LessonError::unorderable(pair[0].type_name(), pair[1].type_name()));
        }
        if let Some(only) = items.first().filter(|_| items.len() == 1) {
            if compare(only, only).is_none() {
                return Err(LessonError::unorderable(only.type_name(), only.type_name()));
            }
        }
        items.sort_by(|a, b| compare(a, b).unwrap_or(Ordering::Equal));
        drop(items);
        Ok(self)
    }

    pub fn reverse(&self) -> &Self {
        self.borrow_mut().reverse();
        self
    }

    /// A new list holding the same elements.
    pub fn copy(&self) -> ListRef {
        ListRef::from_vec(self.snapshot())
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

pub fn walkthrough(report: &mut Report) {
    report.section("List methods");

    let list = ListRef::from_vec(vec![Value::from(1), Value::from(3)]);
    list.insert(1, 2).append(4).extend([5, 6]);
    report.show("after insert/append/extend", Value::List(list.clone()));
    report.check("insert, append, extend", Value::List(list.clone()) == Value::list([1, 2, 3, 4, 5, 6]));

    report.check("pop() returns the last element", list.pop(None) == Some(Value::from(6)));
    report.check("pop(0) returns the first", list.pop(Some(0)) == Some(Value::from(1)));
    report.check("pop(10) is None", list.pop(Some(10)).is_none());

    list.remove(&Value::from(99));
    report.check("removing a missing item is a no-op", list.len() == 4);

    report.check("index_of(4) = 2", list.index_of(&Value::from(4)) == Some(2));
    report.check("index_of(99) is None", list.index_of(&Value::from(99)).is_none());

    let mixed = ListRef::from_vec(vec![Value::from(3), Value::from("a")]);
    report.check("sorting numbers with text fails", mixed.sort().is_err());

    let alias = list.clone();
    let copied = list.copy();
    list.reverse();
    report.check("reverse is seen through an alias", alias.get(0) == Some(Value::from(5)));
    report.check("but not through a copy", copied.get(0) == Some(Value::from(2)));
    report.note("Methods mutate in place; copy() is the way out of aliasing.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list<const N: usize>(items: [i64; N]) -> ListRef {
        ListRef::from_vec(items.into_iter().map(Value::from).collect())
    }

    fn ints(list: &ListRef) -> Vec<i64> {
        list.borrow().iter().filter_map(Value::as_int).collect()
    }

    #[test]
    fn test_add_methods() {
        assert_eq!(ints(list([1, 2]).append(3)), vec![1, 2, 3]);
        assert_eq!(ints(list([1]).extend([2, 3])), vec![1, 2, 3]);
        assert_eq!(ints(list([1, 3]).insert(1, 2)), vec![1, 2, 3]);
        assert_eq!(ints(list([1, 2]).insert(-1, 9)), vec![1, 9, 2]);
        assert_eq!(ints(list([1, 2]).insert(100, 9)), vec![1, 2, 9]);
        assert_eq!(ints(list([1, 2]).insert(-100, 9)), vec![9, 1, 2]);
    }

    #[test]
    fn test_remove_methods() {
        assert_eq!(ints(list([1, 2, 3]).remove(&Value::from(2))), vec![1, 3]);
        assert_eq!(ints(list([1, 2, 1]).remove(&Value::from(1))), vec![2, 1]);
        assert_eq!(ints(list([1, 2]).remove(&Value::from(5))), vec![1, 2]);
        assert_eq!(list([1, 2, 3]).pop(None), Some(Value::from(3)));
        assert_eq!(list([1, 2, 3]).pop(Some(-3)), Some(Value::from(1)));
        assert_eq!(list([]).pop(None), None);
        assert_eq!(list([1]).pop(Some(1)), None);
        assert!(list([1, 2]).clear().is_empty());
    }

    #[test]
    fn test_search_methods() {
        assert_eq!(list([1, 2, 3]).index_of(&Value::from(2)), Some(1));
        assert_eq!(list([1, 2]).index_of(&Value::from(5)), None);
        assert_eq!(list([1, 1, 2]).count(&Value::from(1)), 2);
        assert!(list([1, 2, 3]).contains(&Value::from(3)));
        assert!(list([1, 2, 3]).contains(&Value::from(3.0)));
    }

    #[test]
    fn test_ordering_methods() {
        assert_eq!(ints(list([3, 1, 2]).sort().unwrap()), vec![1, 2, 3]);
        assert_eq!(ints(list([1, 2, 3]).reverse()), vec![3, 2, 1]);

        let words = ListRef::from_vec(vec![Value::from("pear"), Value::from("apple")]);
        words.sort().unwrap();
        assert_eq!(words.get(0), Some(Value::from("apple")));

        let mixed_numbers = ListRef::from_vec(vec![Value::from(2.5), Value::from(1)]);
        mixed_numbers.sort().unwrap();
        assert_eq!(mixed_numbers.get(0), Some(Value::from(1)));
    }

    #[test]
    fn test_sort_rejects_mixed_kinds() {
        let mixed = ListRef::from_vec(vec![Value::from(1), Value::from("a"), Value::from(0)]);
        assert!(matches!(mixed.sort(), Err(LessonError::Unorderable { .. })));
        assert_eq!(mixed.get(2), Some(Value::from(0)));

        let nested = ListRef::from_vec(vec![Value::list([1])]);
        assert!(nested.sort().is_err());
        assert!(list([]).sort().is_ok());
    }

    #[test]
    fn test_copy_method() {
        let original = list([1, 2]);
        let copied = original.copy();
        copied.append(3);
        assert_eq!(ints(&original), vec![1, 2]);
        assert_eq!(ints(&copied), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_truthiness() {
        assert!(!list([]).is_truthy());
        assert!(list([1]).is_truthy());
    }

    #[test]
    fn test_walkthrough_passes() {
        let mut report = Report::new();
        walkthrough(&mut report);
        assert_eq!(report.failures(), 0);
    }
}
