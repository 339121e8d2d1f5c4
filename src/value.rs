//! The value model every lesson builds on.
//!
//! Scalars (`None`, booleans, numbers, text) are immutable: copying one is
//! indistinguishable from sharing it. Containers (lists, dicts, objects) live
//! behind `Rc<RefCell<..>>` handles, so cloning a handle produces an *alias*
//! of the same container and a mutation through one alias is visible through
//! all of them. Making that sharing explicit in the types is the whole point.

use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::{LessonError, Result};

// =============================================================================
// Kinds
// =============================================================================

/// Coarse classification used instead of runtime type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    Sequence,
    Mapping,
    Other,
}

// =============================================================================
// Container handles
// =============================================================================

/// Shared handle to a mutable ordered sequence.
#[derive(Clone, Default)]
pub struct ListRef(Rc<RefCell<Vec<Value>>>);

/// Shared handle to a mutable, insertion-ordered `String -> Value` mapping.
#[derive(Clone, Default)]
pub struct DictRef(Rc<RefCell<IndexMap<String, Value>>>);

/// State of a dynamic object: its class name and attribute table.
#[derive(Clone, Default)]
pub struct ObjectData {
    pub class: String,
    pub attrs: IndexMap<String, Value>,
}

/// Shared handle to a dynamic object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

/// Resolves a possibly negative index against `len`.
pub fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if resolved >= 0 && (resolved as usize) < len {
        Some(resolved as usize)
    } else {
        None
    }
}

impl ListRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        ListRef(Rc::new(RefCell::new(items)))
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at `index` (negative counts from the end). Containers come
    /// back as aliases, not copies.
    pub fn get(&self, index: isize) -> Option<Value> {
        let items = self.0.borrow();
        normalize_index(index, items.len()).map(|i| items[i].clone())
    }

    pub fn set(&self, index: isize, value: Value) -> Result<()> {
        let mut items = self.0.borrow_mut();
        let len = items.len();
        let slot = normalize_index(index, len).ok_or_else(|| LessonError::out_of_range(index, len))?;
        items[slot] = value;
        Ok(())
    }

    /// The current elements, with nested containers still shared.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl DictRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: IndexMap<String, Value>) -> Self {
        DictRef(Rc::new(RefCell::new(entries)))
    }

    pub fn borrow(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, IndexMap<String, Value>> {
        self.0.borrow_mut()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Adds or replaces `key`, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn ptr_eq(&self, other: &DictRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl ObjectRef {
    pub fn new(class: impl Into<String>) -> Self {
        Self::from_data(ObjectData {
            class: class.into(),
            attrs: IndexMap::new(),
        })
    }

    pub fn from_data(data: ObjectData) -> Self {
        ObjectRef(Rc::new(RefCell::new(data)))
    }

    pub fn borrow(&self) -> Ref<'_, ObjectData> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ObjectData> {
        self.0.borrow_mut()
    }

    pub fn class(&self) -> String {
        self.0.borrow().class.clone()
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// =============================================================================
// Value
// =============================================================================

/// A value a name can be bound to.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(ListRef),
    Dict(DictRef),
    Object(ObjectRef),
}

impl Value {
    pub fn list<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(ListRef::from_vec(items.into_iter().map(Into::into).collect()))
    }

    pub fn dict<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Dict(DictRef::from_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Text,
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::List(_) => ValueKind::Sequence,
            Value::Dict(_) => ValueKind::Mapping,
            Value::None | Value::Bool(_) | Value::Object(_) => ValueKind::Other,
        }
    }

    /// Name of the concrete type. The value carries its type; a binding
    /// does not.
    pub fn type_name(&self) -> String {
        match self {
            Value::None => "none".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Dict(_) => "dict".to_string(),
            Value::Object(obj) => obj.class(),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Dict(_) | Value::Object(_))
    }

    /// Identity check.
    ///
    /// Containers are the same object only when both handles point at one
    /// allocation. Immutable scalars are interchangeable, so equal scalars
    /// count as identical.
    pub fn is(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ if self.is_container() || other.is_container() => false,
            _ => self == other,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(list) => !list.is_empty(),
            Value::Dict(dict) => !dict.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictRef> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

// =============================================================================
// Structural equality
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        values_equal(self, other, &mut HashSet::new())
    }
}

/// Pairs already under comparison are assumed equal, which makes the
/// comparison terminate on cyclic structures.
fn values_equal(a: &Value, b: &Value, seen: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => *i as f64 == *f,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) || !seen.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(p, q)| values_equal(p, q, seen))
        }
        (Value::Dict(x), Value::Dict(y)) => {
            if x.ptr_eq(y) || !seen.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            maps_equal(&xs, &ys, seen)
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) || !seen.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            xs.class == ys.class && maps_equal(&xs.attrs, &ys.attrs, seen)
        }
        _ => false,
    }
}

fn maps_equal(
    xs: &IndexMap<String, Value>,
    ys: &IndexMap<String, Value>,
    seen: &mut HashSet<(usize, usize)>,
) -> bool {
    xs.len() == ys.len()
        && xs
            .iter()
            .all(|(key, v)| ys.get(key).map_or(false, |w| values_equal(v, w, seen)))
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// `active` holds the containers currently being printed; meeting one of
/// them again means a cycle.
fn write_value(value: &Value, f: &mut fmt::Formatter<'_>, active: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::None => f.write_str("None"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Int(n) => write!(f, "{}", n),
        Value::Float(x) => write!(f, "{:?}", x),
        Value::Str(s) => write!(f, "{:?}", s),
        Value::List(list) => {
            if active.contains(&list.addr()) {
                return f.write_str("[...]");
            }
            active.push(list.addr());
            f.write_str("[")?;
            for (i, item) in list.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(item, f, active)?;
            }
            active.pop();
            f.write_str("]")
        }
        Value::Dict(dict) => {
            if active.contains(&dict.addr()) {
                return f.write_str("{...}");
            }
            active.push(dict.addr());
            f.write_str("{")?;
            for (i, (key, item)) in dict.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}: ", key)?;
                write_value(item, f, active)?;
            }
            active.pop();
            f.write_str("}")
        }
        Value::Object(obj) => {
            let data = obj.borrow();
            if active.contains(&obj.addr()) {
                return write!(f, "{}(...)", data.class);
            }
            active.push(obj.addr());
            write!(f, "{}(", data.class)?;
            for (i, (name, item)) in data.attrs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}=", name)?;
                write_value(item, f, active)?;
            }
            active.pop();
            f.write_str(")")
        }
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::List(self.clone()), f)
    }
}

impl fmt::Debug for DictRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Dict(self.clone()), f)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Object(self.clone()), f)
    }
}

/// Handles compare by contents, like the values wrapping them.
impl PartialEq for ListRef {
    fn eq(&self, other: &ListRef) -> bool {
        Value::List(self.clone()) == Value::List(other.clone())
    }
}

impl PartialEq for DictRef {
    fn eq(&self, other: &DictRef) -> bool {
        Value::Dict(self.clone()) == Value::Dict(other.clone())
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ListRef> for Value {
    fn from(list: ListRef) -> Self {
        Value::List(list)
    }
}

impl From<DictRef> for Value {
    fn from(dict: DictRef) -> Self {
        Value::Dict(dict)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(ListRef::from_vec(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::from("hi").kind(), ValueKind::Text);
        assert_eq!(Value::from(3).kind(), ValueKind::Number);
        assert_eq!(Value::from(2.5).kind(), ValueKind::Number);
        assert_eq!(Value::list([1, 2]).kind(), ValueKind::Sequence);
        assert_eq!(Value::dict([("a", 1)]).kind(), ValueKind::Mapping);
        assert_eq!(Value::None.kind(), ValueKind::Other);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Other);
    }

    #[test]
    fn test_clone_is_alias() {
        let a = Value::list([1, 2, 3]);
        let b = a.clone();
        assert!(a.is(&b));

        a.as_list().unwrap().borrow_mut().push(Value::from(4));
        assert_eq!(b, Value::list([1, 2, 3, 4]));
    }

    #[test]
    fn test_equal_but_not_identical() {
        let a = Value::list([1, 2]);
        let c = Value::list([1, 2]);
        assert_eq!(a, c);
        assert!(!a.is(&c));
    }

    #[test]
    fn test_scalars_identical_when_equal() {
        assert!(Value::from(10).is(&Value::from(10)));
        assert!(!Value::from(10).is(&Value::from(20)));
        assert!(!Value::from(1).is(&Value::list([1])));
    }

    #[test]
    fn test_int_float_compare_numerically() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::Bool(true));
    }

    #[test]
    fn test_dict_equality_ignores_order() {
        let a = Value::dict([("a", 1), ("b", 2)]);
        let b = Value::dict([("b", 2), ("a", 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::list(Vec::<Value>::new()).is_truthy());
        assert!(Value::from(-3).is_truthy());
        assert!(Value::list([0]).is_truthy());
    }

    #[test]
    fn test_negative_index() {
        let list = ListRef::from_vec(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(list.get(-1), Some(Value::from(3)));
        assert_eq!(list.get(3), None);
        assert_eq!(list.get(-4), None);
        assert!(matches!(
            list.set(5, Value::None),
            Err(LessonError::IndexOutOfRange { index: 5, len: 3 })
        ));
    }

    #[test]
    fn test_display() {
        let value = Value::list(vec![
            Value::from(1),
            Value::from("a"),
            Value::dict([("k", 2.5)]),
        ]);
        assert_eq!(value.to_string(), r#"[1, "a", {"k": 2.5}]"#);
    }

    #[test]
    fn test_cycle_display_and_equality_terminate() {
        let list = ListRef::new();
        list.borrow_mut().push(Value::from(1));
        list.borrow_mut().push(Value::List(list.clone()));
        let value = Value::List(list.clone());
        assert_eq!(value.to_string(), "[1, [...]]");

        let other = ListRef::new();
        other.borrow_mut().push(Value::from(1));
        other.borrow_mut().push(Value::List(other.clone()));
        assert_eq!(value, Value::List(other));
    }
}
