//! Lesson 1: a variable is a reference, not a box.

use crate::bindings::Bindings;
use crate::error::Result;
use crate::report::Report;
use crate::value::Value;

// =============================================================================
// Example: assignment copies the reference
// =============================================================================

/// `a = 10; b = a`: one value, two names.
pub fn reference_copy() -> Result<Bindings> {
    let mut scope = Bindings::new();
    scope.bind("a", 10);
    scope.alias("b", "a")?;
    Ok(scope)
}

// =============================================================================
// Example: the value has the type, not the name
// =============================================================================

/// Rebinds `x` from a number to text and reports both type names.
pub fn retype() -> Result<(String, String)> {
    let mut scope = Bindings::new();
    scope.bind("x", 10);
    let before = scope.type_of("x")?;
    scope.bind("x", "hello");
    let after = scope.type_of("x")?;
    Ok((before, after))
}

// =============================================================================
// Example: immutable values are safe to share
// =============================================================================

/// `a = 10; b = a; a = 20`: returns `(a, b)`.
pub fn immutable_rebind() -> Result<(Value, Value)> {
    let mut scope = reference_copy()?;
    scope.bind("a", 20);
    Ok((scope.lookup("a")?.clone(), scope.lookup("b")?.clone()))
}

// =============================================================================
// Example: mutable containers are shared
// =============================================================================

/// `a = [1, 2, 3]; b = a; a.append(4)`: returns `b`.
pub fn mutable_alias() -> Result<Value> {
    let mut scope = Bindings::new();
    scope.bind("a", Value::list([1, 2, 3]));
    scope.alias("b", "a")?;
    if let Some(list) = scope.lookup("a")?.as_list() {
        list.borrow_mut().push(Value::from(4));
    }
    Ok(scope.lookup("b")?.clone())
}

pub fn walkthrough(report: &mut Report) {
    report.section("Variables and references");

    match reference_copy() {
        Ok(scope) => {
            report.check(
                "b = a binds b to the same value",
                scope.same_object("a", "b").unwrap_or(false),
            );
        }
        Err(err) => {
            report.check(format!("reference copy failed: {err}"), false);
        }
    }

    if let Ok((before, after)) = retype() {
        report.show("x types", format!("{before} -> {after}"));
        report.check("rebinding x changes the type it points at", before == "int" && after == "str");
    }

    if let Ok((a, b)) = immutable_rebind() {
        report.check("a = 20 leaves b at 10", a == Value::from(20) && b == Value::from(10));
    }

    if let Ok(b) = mutable_alias() {
        report.show("b", &b);
        report.check("a.append(4) is visible through b", b == Value::list([1, 2, 3, 4]));
    }

    report.note("Rebinding never mutates; mutation is seen through every alias.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_copy() {
        let scope = reference_copy().unwrap();
        assert!(scope.same_object("a", "b").unwrap());
    }

    #[test]
    fn test_retype() {
        assert_eq!(retype().unwrap(), ("int".to_string(), "str".to_string()));
    }

    #[test]
    fn test_immutable_rebind() {
        let (a, b) = immutable_rebind().unwrap();
        assert_eq!(a, Value::from(20));
        assert_eq!(b, Value::from(10));
    }

    #[test]
    fn test_mutable_alias() {
        assert_eq!(mutable_alias().unwrap(), Value::list([1, 2, 3, 4]));
    }

    #[test]
    fn test_walkthrough_passes() {
        let mut report = Report::new();
        walkthrough(&mut report);
        assert_eq!(report.failures(), 0);
        assert_eq!(report.checks(), 4);
    }
}
