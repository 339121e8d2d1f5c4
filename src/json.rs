use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Number, Value as Json};

use crate::error::{LessonError, Result};
use crate::value::{ListRef, Value};

// =============================================================================
// serde_json <-> Value
// =============================================================================

impl Value {
    /// Builds fresh containers from a JSON document. Integers that fit in
    /// `i64` become `Int`, every other number becomes `Float`.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(ListRef::from_vec(
                items.into_iter().map(Value::from_json).collect(),
            )),
            Json::Object(entries) => {
                Value::dict(entries.into_iter().map(|(k, v)| (k, Value::from_json(v))))
            }
        }
    }

    /// Objects become JSON objects with an extra `"__class__"` entry.
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> Result<Json> {
        to_json(self, &mut Vec::new())
    }
}

fn to_json(value: &Value, active: &mut Vec<usize>) -> Result<Json> {
    let json = match value {
        Value::None => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::Number((*n).into()),
        Value::Float(x) => Number::from_f64(*x).map_or(Json::Null, Json::Number),
        Value::Str(s) => Json::String(s.clone()),
        Value::List(list) => {
            enter(list.addr(), active)?;
            let items = list
                .borrow()
                .iter()
                .map(|item| to_json(item, active))
                .collect::<Result<Vec<_>>>()?;
            active.pop();
            Json::Array(items)
        }
        Value::Dict(dict) => {
            enter(dict.addr(), active)?;
            let mut map = Map::new();
            for (key, item) in dict.borrow().iter() {
                map.insert(key.clone(), to_json(item, active)?);
            }
            active.pop();
            Json::Object(map)
        }
        Value::Object(obj) => {
            enter(obj.addr(), active)?;
            let data = obj.borrow();
            let mut map = Map::new();
            map.insert("__class__".to_string(), Json::String(data.class.clone()));
            for (name, item) in data.attrs.iter() {
                map.insert(name.clone(), to_json(item, active)?);
            }
            active.pop();
            Json::Object(map)
        }
    };
    Ok(json)
}

fn enter(addr: usize, active: &mut Vec<usize>) -> Result<()> {
    if active.contains(&addr) {
        return Err(LessonError::CyclicValue);
    }
    active.push(addr);
    Ok(())
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectRef;
    use serde_json::json;

    #[test]
    fn test_from_json_builds_containers() {
        let value = Value::from_json(json!({
            "user": {"id": 1, "name": "Raj"},
            "scores": [1.5, 2],
            "active": true,
            "note": null
        }));
        let dict = value.as_dict().unwrap();
        assert_eq!(dict.get("user"), Some(Value::dict([("id", Value::from(1)), ("name", Value::from("Raj"))])));
        assert_eq!(dict.get("scores"), Some(Value::list(vec![Value::from(1.5), Value::from(2)])));
        assert_eq!(dict.get("active"), Some(Value::Bool(true)));
        assert_eq!(dict.get("note"), Some(Value::None));
    }

    #[test]
    fn test_serialize_through_serde() {
        let value = Value::dict([("b", Value::from(2)), ("a", Value::list([1.5]))]);
        let text = serde_json::to_string(&value).unwrap();
        let parsed: Json = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"a": [1.5], "b": 2}));
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let value = Value::dict([("b", Value::from(2)), ("a", Value::from(1))]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":2,"a":1}"#);

        let parsed = Value::from_json(serde_json::from_str(r#"{"z": 1, "m": 2, "a": 3}"#).unwrap());
        assert_eq!(parsed.as_dict().unwrap().keys(), vec!["z", "m", "a"]);
    }

    #[test]
    fn test_object_to_json() {
        let obj = ObjectRef::new("User");
        obj.borrow_mut().attrs.insert("name".to_string(), Value::from("Raj"));
        assert_eq!(
            Value::Object(obj).to_json().unwrap(),
            json!({"__class__": "User", "name": "Raj"})
        );
    }

    #[test]
    fn test_cycle_is_an_error() {
        let list = ListRef::new();
        list.borrow_mut().push(Value::List(list.clone()));
        assert!(matches!(
            Value::List(list).to_json(),
            Err(LessonError::CyclicValue)
        ));
    }

    #[test]
    fn test_shared_but_acyclic_is_fine() {
        let shared = Value::list([1]);
        let value = Value::list([shared.clone(), shared]);
        assert_eq!(value.to_json().unwrap(), json!([[1], [1]]));
    }
}
