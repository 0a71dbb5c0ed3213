//! Conversion between [`Value`] and `serde_json::Value`.

use rustc_hash::FxHashSet;
use serde_json::{Map, Number};

use crate::error::{Error, Result};
use crate::value::{JsObject, Value};

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::string(s.as_str()),
            serde_json::Value::Array(arr) => Value::array(arr.iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::object(JsObject::from_entries(
                obj.iter().map(|(key, val)| (key.clone(), Value::from(val))),
            )),
        }
    }
}

/// Exports a value as JSON, following `JSON.stringify` rules.
///
/// - `undefined` and functions are dropped from objects and become `null` in
///   arrays (and at the top level)
/// - non-finite numbers become `null`; integral numbers stay integers
/// - dates become ISO 8601 strings, regular expressions become `{}`
/// - objects export their own enumerable properties, natives their entries
///
/// # Errors
///
/// [`Error::CyclicValue`] when a value contains itself.
///
/// # Examples
///
/// ```
/// use app_helpers::{to_json, Value};
/// use serde_json::json;
///
/// let value = Value::from(&json!({"a": [1, 2.5, null]}));
/// assert_eq!(to_json(&value).unwrap(), json!({"a": [1, 2.5, null]}));
/// ```
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    let mut exporter = Exporter::default();
    Ok(exporter.export(value)?.unwrap_or(serde_json::Value::Null))
}

#[derive(Default)]
struct Exporter {
    /// Addresses on the current path from the root.
    ancestors: FxHashSet<usize>,
}

impl Exporter {
    /// `None` marks values JSON has no representation for.
    fn export(&mut self, value: &Value) -> Result<Option<serde_json::Value>> {
        let json = match value {
            Value::Undefined | Value::Function(_) => return Ok(None),
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Date(date) => serde_json::Value::String(date.borrow().to_iso_string()),
            Value::RegExp(_) => serde_json::Value::Object(Map::new()),
            Value::Array(items) => {
                let items = items.borrow().clone();
                let arr = self.nested(value, |exporter| {
                    items
                        .iter()
                        .map(|item| -> Result<serde_json::Value> {
                            Ok(exporter.export(item)?.unwrap_or(serde_json::Value::Null))
                        })
                        .collect::<Result<Vec<_>>>()
                })?;
                serde_json::Value::Array(arr)
            }
            Value::Object(obj) => {
                let entries: Vec<(String, Value)> = {
                    let obj = obj.borrow();
                    let entries = obj
                        .own_enumerable_keys()
                        .filter_map(|key| obj.get_own(key).map(|val| (key.clone(), val)))
                        .collect();
                    entries
                };
                serde_json::Value::Object(self.nested(value, |exporter| exporter.entries(entries))?)
            }
            Value::Native(native) => {
                let entries = native.entries();
                serde_json::Value::Object(self.nested(value, |exporter| exporter.entries(entries))?)
            }
        };
        Ok(Some(json))
    }

    fn entries(&mut self, entries: Vec<(String, Value)>) -> Result<Map<String, serde_json::Value>> {
        let mut map = Map::new();
        for (key, val) in entries {
            if let Some(json) = self.export(&val)? {
                map.insert(key, json);
            }
        }
        Ok(map)
    }

    fn nested<T>(&mut self, value: &Value, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let Some(addr) = value.identity() else {
            return f(self);
        };
        if !self.ancestors.insert(addr) {
            return Err(Error::CyclicValue);
        }
        let out = f(self);
        self.ancestors.remove(&addr);
        out
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{JsDate, JsRegExp};
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = Value::from(&json!({"a": [1, "two", true, null], "b": {}}));
        assert_eq!(value.get("a").get("1"), Value::from("two"));
        assert_eq!(value.get("a").get("length"), Value::from(4));
        assert_eq!(value.get("a").get("3"), Value::Null);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let doc = json!({"z": 1, "a": {"nested": [1.5, -2]}, "m": "s"});
        let back = to_json(&Value::from(&doc)).unwrap();
        assert_eq!(back, doc);
        let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_undefined_and_functions() {
        let f = Value::function("f", 0, |_, _| Value::Undefined);
        let value = Value::object_from([
            ("u", Value::Undefined),
            ("f", f.clone()),
            ("list", Value::array(vec![Value::Undefined, f])),
        ]);
        assert_eq!(to_json(&value).unwrap(), json!({"list": [null, null]}));
        assert_eq!(to_json(&Value::Undefined).unwrap(), json!(null));
    }

    #[test]
    fn test_special_values() {
        let value = Value::array(vec![
            Value::Number(f64::NAN),
            Value::Number(f64::INFINITY),
            Value::date(JsDate::from_millis(0).unwrap()),
            Value::regexp(JsRegExp::new("a", "g").unwrap()),
        ]);
        assert_eq!(
            to_json(&value).unwrap(),
            json!([null, null, "1970-01-01T00:00:00.000Z", {}])
        );
    }

    #[test]
    fn test_hidden_and_inherited_properties_skipped() {
        let Value::Object(proto) = Value::object_from([("inherited", Value::from(1))]) else {
            unreachable!()
        };
        let mut obj = JsObject::with_prototype(Some(proto));
        obj.set("own", Value::from(2));
        obj.define("hidden", Value::from(3), false);
        assert_eq!(to_json(&Value::object(obj)).unwrap(), json!({"own": 2}));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let a = Value::object_from([("v", Value::from(1))]);
        a.set("me", a.clone());
        assert!(matches!(to_json(&a), Err(Error::CyclicValue)));
    }

    #[test]
    fn test_shared_reference_is_not_a_cycle() {
        let shared = Value::array(vec![Value::from(1)]);
        let value = Value::array(vec![shared.clone(), shared]);
        assert_eq!(to_json(&value).unwrap(), json!([[1], [1]]));
    }
}
