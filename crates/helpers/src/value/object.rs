use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::rc::Rc;

use super::{ObjectRef, Value};

/// A property slot.
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

/// Ordered property bag with an optional prototype.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    prototype: Option<ObjectRef>,
    properties: IndexMap<String, Property>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prototype(prototype: Option<ObjectRef>) -> Self {
        Self {
            prototype,
            properties: IndexMap::new(),
        }
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut obj = Self::new();
        for (key, value) in entries {
            obj.set(key, value);
        }
        obj
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.prototype.clone()
    }

    pub fn set_prototype(&mut self, prototype: Option<ObjectRef>) {
        self.prototype = prototype;
    }

    /// Writes an own property. A new key is enumerable; an existing key
    /// keeps its enumerability.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.properties.get_mut(&key) {
            Some(prop) => prop.value = value,
            None => {
                self.properties.insert(
                    key,
                    Property {
                        value,
                        enumerable: true,
                    },
                );
            }
        }
    }

    /// Defines (or redefines) an own property with explicit enumerability.
    pub fn define(&mut self, key: impl Into<String>, value: Value, enumerable: bool) {
        self.properties
            .insert(key.into(), Property { value, enumerable });
    }

    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.properties.get(key).map(|prop| prop.value.clone())
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.shift_remove(key).map(|prop| prop.value)
    }

    /// All own keys in insertion order, enumerable or not.
    pub fn own_keys(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }

    pub fn own_enumerable_keys(&self) -> impl Iterator<Item = &String> {
        self.properties
            .iter()
            .filter(|(_, prop)| prop.enumerable)
            .map(|(key, _)| key)
    }

    pub fn own_len(&self) -> usize {
        self.properties.len()
    }
}

/// Walks `obj` and its prototypes, stopping early if the visitor returns
/// `Some`. Prototype loops are cut at the first repeated link.
fn walk_chain<T>(obj: &ObjectRef, mut visit: impl FnMut(&JsObject) -> Option<T>) -> Option<T> {
    let mut seen = FxHashSet::default();
    let mut current = Some(Rc::clone(obj));
    while let Some(link) = current {
        if !seen.insert(Rc::as_ptr(&link) as usize) {
            break;
        }
        let link = link.borrow();
        if let Some(found) = visit(&link) {
            return Some(found);
        }
        current = link.prototype();
    }
    None
}

/// Reads `key` from `obj` or the nearest prototype that owns it.
pub fn lookup(obj: &ObjectRef, key: &str) -> Option<Value> {
    walk_chain(obj, |link| link.get_own(key))
}

/// Keys a `for ... in` loop would visit: own enumerable keys first, then
/// inherited ones. A key seen on a nearer link, enumerable or not, hides
/// the same key further up the chain.
pub fn enumerable_keys(obj: &ObjectRef) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut keys = Vec::new();
    walk_chain::<()>(obj, |link| {
        for (key, prop) in &link.properties {
            if seen.insert(key.clone()) && prop.enumerable {
                keys.push(key.clone());
            }
        }
        None
    });
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn shared(obj: JsObject) -> ObjectRef {
        Rc::new(RefCell::new(obj))
    }

    #[test]
    fn test_set_keeps_enumerability() {
        let mut obj = JsObject::new();
        obj.define("hidden", Value::from(1), false);
        obj.set("hidden", Value::from(2));
        assert_eq!(obj.get_own("hidden"), Some(Value::from(2)));
        assert_eq!(obj.own_enumerable_keys().count(), 0);
        assert_eq!(obj.own_len(), 1);
    }

    #[test]
    fn test_lookup_walks_prototypes() {
        let proto = shared(JsObject::from_entries([("greeting", Value::from("hi"))]));
        let child = shared(JsObject::with_prototype(Some(proto)));
        assert_eq!(lookup(&child, "greeting"), Some(Value::from("hi")));
        assert_eq!(lookup(&child, "missing"), None);
    }

    #[test]
    fn test_enumerable_keys_order_and_shadowing() {
        let mut base = JsObject::new();
        base.set("inherited", Value::from(1));
        base.set("shadowed", Value::from(2));
        let base = shared(base);

        let mut child = JsObject::with_prototype(Some(base));
        child.set("own", Value::from(3));
        child.define("shadowed", Value::from(4), false);
        let child = shared(child);

        assert_eq!(enumerable_keys(&child), vec!["own", "inherited"]);
    }

    #[test]
    fn test_prototype_loop_terminates() {
        let a = shared(JsObject::from_entries([("a", Value::from(1))]));
        let b = shared(JsObject::with_prototype(Some(Rc::clone(&a))));
        a.borrow_mut().set_prototype(Some(Rc::clone(&b)));

        assert_eq!(lookup(&b, "nope"), None);
        assert_eq!(enumerable_keys(&b), vec!["a"]);
    }
}
