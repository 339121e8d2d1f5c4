//! Assignment, shallow copy and deep copy.
//!
//! | Scenario                         | Use          |
//! | -------------------------------- | ------------ |
//! | Flat list of numbers             | Shallow copy |
//! | 2D list                          | Deep copy    |
//! | Dict with lists                  | Deep copy    |
//! | Read-only and hot                | Shallow copy |
//! | Tests / isolation                | Deep copy    |

use std::collections::HashMap;

use crate::value::{DictRef, ListRef, ObjectData, ObjectRef, Value};

// =============================================================================
// No copy (assignment)
// =============================================================================

/// Assignment never copies: the result is another handle to the same value.
pub fn no_copy(original: &Value) -> Value {
    original.clone()
}

// =============================================================================
// Shallow copies
// =============================================================================

/// New outer container, same first-level elements.
///
/// Replacing a slot in the copy leaves the source alone, but a nested
/// container reached through a slot is shared by both.
pub fn shallow_copy(original: &Value) -> Value {
    match original {
        Value::List(list) => Value::List(ListRef::from_vec(list.snapshot())),
        Value::Dict(dict) => Value::Dict(DictRef::from_map(dict.borrow().clone())),
        Value::Object(obj) => Value::Object(ObjectRef::from_data(obj.borrow().clone())),
        scalar => scalar.clone(),
    }
}

/// Full-range slice of a list; the same thing as [`shallow_copy`].
pub fn shallow_copy_slice(original: &ListRef) -> ListRef {
    ListRef::from_vec(original.borrow()[..].to_vec())
}

// =============================================================================
// Deep copy
// =============================================================================

/// Recursively fresh copy sharing no container with `original`.
///
/// Containers are remembered by address the first time they are reached, so
/// a container that appears twice in the source appears twice (as one
/// container) in the copy, and cycles end at the memo instead of recursing.
pub fn deep_copy(original: &Value) -> Value {
    DeepCopier::default().copy(original)
}

#[derive(Default)]
struct DeepCopier {
    memo: HashMap<usize, Value>,
}

impl DeepCopier {
    fn copy(&mut self, value: &Value) -> Value {
        match value {
            Value::List(list) => {
                if let Some(done) = self.memo.get(&list.addr()) {
                    return done.clone();
                }
                let fresh = ListRef::new();
                self.memo.insert(list.addr(), Value::List(fresh.clone()));
                let items: Vec<Value> = list.borrow().iter().map(|item| self.copy(item)).collect();
                *fresh.borrow_mut() = items;
                Value::List(fresh)
            }
            Value::Dict(dict) => {
                if let Some(done) = self.memo.get(&dict.addr()) {
                    return done.clone();
                }
                let fresh = DictRef::new();
                self.memo.insert(dict.addr(), Value::Dict(fresh.clone()));
                let entries = dict
                    .borrow()
                    .iter()
                    .map(|(key, item)| (key.clone(), self.copy(item)))
                    .collect();
                *fresh.borrow_mut() = entries;
                Value::Dict(fresh)
            }
            Value::Object(obj) => {
                if let Some(done) = self.memo.get(&obj.addr()) {
                    return done.clone();
                }
                let fresh = ObjectRef::new(obj.class());
                self.memo.insert(obj.addr(), Value::Object(fresh.clone()));
                let attrs = obj
                    .borrow()
                    .attrs
                    .iter()
                    .map(|(name, item)| (name.clone(), self.copy(item)))
                    .collect();
                *fresh.borrow_mut() = ObjectData {
                    class: obj.class(),
                    attrs,
                };
                Value::Object(fresh)
            }
            scalar => scalar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::Index;

    fn grid() -> Value {
        Value::list([Value::list([1, 2]), Value::list([3, 4])])
    }

    fn cell(value: &Value, row: isize, col: isize) -> Value {
        value
            .as_list()
            .and_then(|rows| rows.get(row))
            .and_then(|r| r.as_list().and_then(|r| r.get(col)))
            .unwrap_or_default()
    }

    fn set_cell(value: &Value, row: isize, col: isize, new: i64) {
        let r = value.as_list().unwrap().get(row).unwrap();
        r.as_list().unwrap().set(col, Value::from(new)).unwrap();
    }

    #[test]
    fn test_no_copy() {
        let original = grid();
        let new = no_copy(&original);
        set_cell(&new, 0, 0, 99);
        assert_eq!(cell(&original, 0, 0), Value::from(99));
        assert!(new.is(&original));
    }

    #[test]
    fn test_shallow_copy() {
        let original = grid();
        let new = shallow_copy(&original);
        set_cell(&new, 0, 0, 99);
        assert_eq!(cell(&original, 0, 0), Value::from(99));
        assert!(!new.is(&original));
    }

    #[test]
    fn test_shallow_copy_slice() {
        let original = grid();
        let new = shallow_copy_slice(original.as_list().unwrap());
        set_cell(&Value::List(new), 1, 1, 88);
        assert_eq!(cell(&original, 1, 1), Value::from(88));
    }

    #[test]
    fn test_deep_copy() {
        let original = grid();
        let new = deep_copy(&original);
        set_cell(&new, 0, 0, 99);
        assert_eq!(cell(&original, 0, 0), Value::from(1));
        assert_eq!(cell(&new, 0, 0), Value::from(99));
    }

    #[test]
    fn test_outer_change_shallow() {
        let original = grid();
        let new = shallow_copy(&original);
        new.as_list().unwrap().borrow_mut().push(Value::list([5, 6]));
        assert_eq!(original.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_outer_change_deep() {
        let original = grid();
        let new = deep_copy(&original);
        new.as_list().unwrap().borrow_mut().push(Value::list([5, 6]));
        assert_eq!(original.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_first_level_slot_is_independent() {
        let original = Value::list([1, 2, 3]);
        let new = shallow_copy(&original);
        new.as_list().unwrap().set(0, Value::from(100)).unwrap();
        assert_eq!(original, Value::list([1, 2, 3]));
    }

    #[test]
    fn test_empty_containers_keep_their_kind() {
        let list = Value::list(Vec::<Value>::new());
        let dict = Value::dict(Vec::<(String, Value)>::new());
        for copied in [shallow_copy(&list), deep_copy(&list)] {
            assert!(matches!(&copied, Value::List(l) if l.is_empty()));
            assert!(!copied.is(&list));
        }
        for copied in [shallow_copy(&dict), deep_copy(&dict)] {
            assert!(matches!(&copied, Value::Dict(d) if d.is_empty()));
        }
    }

    #[test]
    fn test_scalar_only_copies_agree() {
        let original = Value::list(vec![Value::from(1), Value::from("a"), Value::from(2.5)]);
        assert_eq!(shallow_copy(&original), deep_copy(&original));
    }

    #[test]
    fn test_dict_with_lists() {
        let original = Value::dict([("scores", Value::list([80, 90]))]);
        let shallow = shallow_copy(&original);
        let deep = deep_copy(&original);

        let shared = shallow.as_dict().unwrap().get("scores").unwrap();
        shared.as_list().unwrap().borrow_mut().push(Value::from(70));
        assert_eq!(original.as_dict().unwrap().get("scores"), Some(Value::list([80, 90, 70])));
        assert_eq!(deep.as_dict().unwrap().get("scores"), Some(Value::list([80, 90])));
    }

    #[test]
    fn test_deep_copy_cycle() {
        let list = ListRef::new();
        list.borrow_mut().push(Value::from(1));
        list.borrow_mut().push(Value::List(list.clone()));
        let original = Value::List(list.clone());

        let copied = deep_copy(&original);
        let inner = copied.as_list().unwrap().get(1).unwrap();
        assert!(inner.is(&copied));
        assert!(!inner.is(&original));
        assert_eq!(copied, original);
    }

    #[test]
    fn test_deep_copy_preserves_sharing() {
        let shared = Value::list([7]);
        let original = Value::list([shared.clone(), shared]);
        let copied = deep_copy(&original);

        let first = copied.as_list().unwrap().get(0).unwrap();
        let second = copied.as_list().unwrap().get(1).unwrap();
        assert!(first.is(&second));
        assert!(!first.is(&original.as_list().unwrap().get(0).unwrap()));
    }

    #[test]
    fn test_object_copies() {
        let obj = ObjectRef::new("User");
        obj.borrow_mut().attrs.insert("tags".to_string(), Value::list(["a"]));
        let original = Value::Object(obj);

        let shallow = shallow_copy(&original);
        let deep = deep_copy(&original);
        assert!(!shallow.is(&original));
        let tags = |v: &Value| v.as_object().unwrap().borrow().attrs["tags"].clone();
        assert!(tags(&shallow).is(&tags(&original)));
        assert!(!tags(&deep).is(&tags(&original)));
        assert_eq!(deep, original);
    }

    fn nested(rows: &[Vec<i64>]) -> Value {
        Value::list(rows.iter().map(|row| Value::list(row.iter().copied())))
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
        prop::collection::vec(prop::collection::vec(any::<i64>(), 1..5), 1..5)
    }

    proptest! {
        #[test]
        fn prop_shallow_copy_shares_only_nested(
            rows in rows_strategy(),
            r in any::<Index>(),
            c in any::<Index>(),
            new in any::<i64>(),
        ) {
            let original = nested(&rows);
            let copied = shallow_copy(&original);
            let row = r.index(rows.len()) as isize;
            let col = c.index(rows[row as usize].len()) as isize;

            set_cell(&copied, row, col, new);
            prop_assert_eq!(cell(&original, row, col), Value::from(new));

            copied.as_list().unwrap().set(row, Value::from(new)).unwrap();
            prop_assert!(original.as_list().unwrap().get(row).unwrap().as_list().is_some());
        }

        #[test]
        fn prop_deep_copy_is_isolated(
            rows in rows_strategy(),
            r in any::<Index>(),
            c in any::<Index>(),
            new in any::<i64>(),
        ) {
            let original = nested(&rows);
            let copied = deep_copy(&original);
            let row = r.index(rows.len()) as isize;
            let col = c.index(rows[row as usize].len()) as isize;

            set_cell(&copied, row, col, new);
            copied.as_list().unwrap().borrow_mut().push(Value::list([new]));
            prop_assert_eq!(&original, &nested(&rows));

            set_cell(&original, row, col, new.wrapping_add(1));
            prop_assert_eq!(cell(&copied, row, col), Value::from(new));
        }
    }
}
