//! Lesson 9: objects, identity and introspection.
//!
//! A struct like [`User`] has a fixed set of fields known to the compiler.
//! Attributes that come and go at runtime need the dynamic [`ObjectRef`],
//! and `User` converts to and from one.

use std::fmt;

use crate::report::Report;
use crate::value::{ObjectRef, Value};

pub const USER_CLASS: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    pub fn is_adult(&self) -> bool {
        self.age >= 18
    }

    pub fn to_object(&self) -> ObjectRef {
        let obj = ObjectRef::new(USER_CLASS);
        obj.set_attribute("name", self.name.as_str())
            .set_attribute("age", i64::from(self.age));
        obj
    }

    /// Reads a `User` back out of a dynamic object. Any other class, or a
    /// missing or mistyped field, gives `None`.
    pub fn from_object(obj: &ObjectRef) -> Option<Self> {
        if obj.get_class() != USER_CLASS {
            return None;
        }
        let name = obj.get_attribute("name")?.as_str()?.to_string();
        let age = u32::try_from(obj.get_attribute("age")?.as_int()?).ok()?;
        Some(Self { name, age })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(name={}, age={})", self.name, self.age)
    }
}

// =============================================================================
// Identity
// =============================================================================

pub fn same_identity(a: &Value, b: &Value) -> bool {
    a.is(b)
}

pub fn same_value(a: &Value, b: &Value) -> bool {
    a == b
}

// =============================================================================
// Introspection
// =============================================================================

impl ObjectRef {
    pub fn get_class(&self) -> String {
        self.class()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.borrow().attrs.contains_key(name)
    }

    pub fn get_attribute(&self, name: &str) -> Option<Value> {
        self.borrow().attrs.get(name).cloned()
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.borrow_mut().attrs.insert(name.into(), value.into());
        self
    }

    /// Removing an attribute that is not there does nothing.
    pub fn delete_attribute(&self, name: &str) -> &Self {
        self.borrow_mut().attrs.shift_remove(name);
        self
    }
}

pub fn walkthrough(report: &mut Report) {
    report.section("Objects");

    let a = Value::list([1, 2]);
    let b = a.clone();
    let c = Value::list([1, 2]);
    report.check("b = a is the same object", same_identity(&a, &b));
    report.check("an equal list is a different object", !same_identity(&a, &c) && same_value(&a, &c));

    let user = User::new("Raj", 25);
    report.show("user", &user);
    report.check("Raj is an adult", user.is_adult());
    report.check("equal fields make equal users", user == User::new("Raj", 25) && user != User::new("Raj", 17));

    let obj = user.to_object();
    obj.set_attribute("city", "Chennai");
    report.show("as object", Value::Object(obj.clone()));
    report.check("set_attribute adds city", obj.get_attribute("city") == Some(Value::from("Chennai")));
    obj.delete_attribute("city").delete_attribute("city");
    report.check("deleting twice is harmless", !obj.has_attribute("city"));
    report.check("the object converts back", User::from_object(&obj).as_ref() == Some(&user));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_vs_equality() {
        let a = Value::list([1, 2]);
        let b = a.clone();
        let c = Value::list([1, 2]);
        assert!(same_identity(&a, &b));
        assert!(!same_identity(&a, &c));
        assert!(same_value(&a, &c));
    }

    #[test]
    fn test_custom_object() {
        let u = User::new("Raj", 25);
        assert!(u.is_adult());
        assert!(!User::new("Asha", 17).is_adult());
        assert_eq!(u.to_string(), "User(name=Raj, age=25)");
    }

    #[test]
    fn test_object_equality() {
        let u1 = User::new("Raj", 25);
        let u2 = User::new("Raj", 25);
        let u3 = User::new("Raj", 17);
        assert_eq!(u1, u2);
        assert_ne!(u1, u3);
    }

    #[test]
    fn test_introspection() {
        let u = User::new("Raj", 25).to_object();
        assert!(u.has_attribute("name"));
        assert_eq!(u.get_attribute("name"), Some(Value::from("Raj")));
        assert_eq!(u.get_attribute("email"), None);

        u.set_attribute("city", "Chennai");
        assert_eq!(u.get_attribute("city"), Some(Value::from("Chennai")));

        u.delete_attribute("city");
        assert!(!u.has_attribute("city"));
        u.delete_attribute("city");
        assert!(u.has_attribute("name"));
    }

    #[test]
    fn test_type_and_class() {
        let u = User::new("Raj", 25).to_object();
        assert_eq!(u.get_class(), USER_CLASS);
        assert_eq!(Value::Object(u).type_name(), "User");
    }

    #[test]
    fn test_object_round_trip() {
        let user = User::new("Raj", 25);
        assert_eq!(User::from_object(&user.to_object()), Some(user));
    }

    #[test]
    fn test_from_object_rejects_other_shapes() {
        let other = ObjectRef::new("Admin");
        other.set_attribute("name", "Raj").set_attribute("age", 30);
        assert_eq!(User::from_object(&other), None);

        let broken = User::new("Raj", 25).to_object();
        broken.set_attribute("age", -1);
        assert_eq!(User::from_object(&broken), None);

        let missing = User::new("Raj", 25).to_object();
        missing.delete_attribute("name");
        assert_eq!(User::from_object(&missing), None);
    }

    #[test]
    fn test_objects_alias_like_containers() {
        let obj = Value::Object(User::new("Raj", 25).to_object());
        let alias = obj.clone();
        alias.as_object().unwrap().set_attribute("age", 26);
        assert!(same_identity(&obj, &alias));
        assert_eq!(obj.as_object().unwrap().get_attribute("age"), Some(Value::from(26)));
    }

    #[test]
    fn test_walkthrough_passes() {
        let mut report = Report::new();
        walkthrough(&mut report);
        assert_eq!(report.failures(), 0);
    }
}
