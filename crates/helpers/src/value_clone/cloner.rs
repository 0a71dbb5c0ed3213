use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::for_each::{array_elements, for_each_element};
use crate::type_of::{type_of, TypeTag};
use crate::value::{
    enumerable_keys, lookup, ArrayRef, JsDate, JsObject, JsRegExp, NativeRef, ObjectRef, Value,
};

/// Creates a structurally independent copy of `value`.
///
/// Primitives and functions come back unchanged. Arrays, dates, regular
/// expressions and objects are duplicated recursively. An aggregate met a
/// second time during the same call is returned as the original reference,
/// so cyclic input terminates but the cycle is not rebuilt in the output.
///
/// # Examples
///
/// ```
/// use app_helpers::{clone, deep_equal, Value};
///
/// let original = Value::object_from([("list", Value::array(vec![Value::from(1)]))]);
/// let copy = clone(&original);
///
/// assert!(deep_equal(&original, &copy));
/// assert_ne!(original.get("list"), copy.get("list"));
/// ```
pub fn clone(value: &Value) -> Value {
    Cloner::default().clone_value(value)
}

/// One clone invocation. The visited set never outlives it.
#[derive(Debug, Default)]
struct Cloner {
    /// Visited aggregates keyed by address. Holding the handle keeps the
    /// address from being reused by a temporary during the call.
    visited: FxHashMap<usize, Value>,
}

impl Cloner {
    fn clone_value(&mut self, value: &Value) -> Value {
        // Functions classify as non-aggregates and are never duplicated.
        let tag = type_of(value);
        if !value.exists() || !tag.is_aggregate() {
            return value.clone();
        }
        let Some(addr) = value.identity() else {
            return value.clone();
        };
        if self.visited.insert(addr, value.clone()).is_some() {
            tracing::trace!(addr, "already visited, returning original reference");
            return value.clone();
        }

        if let Some(copy) = self.clone_with_hook(value) {
            return copy;
        }

        match tag {
            TypeTag::Array => self.clone_array(value),
            TypeTag::Date => match date_of(value) {
                Some(date) => Value::date(date),
                None => self.clone_generic(value),
            },
            TypeTag::RegExp => match clone_regexp(value) {
                Some(copy) => copy,
                None => self.clone_generic(value),
            },
            _ => self.clone_generic(value),
        }
    }

    /// Custom clone hooks: the `SelfCloning` capability on native values, or
    /// a `clone` function reachable from a plain object.
    fn clone_with_hook(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Native(native) => {
                let hook = native.as_self_cloning()?;
                tracing::trace!(class = native.class_name(), "deferring to self-cloning value");
                Some(hook.clone_value(true))
            }
            Value::Object(obj) => match lookup(obj, "clone") {
                Some(Value::Function(hook)) => {
                    tracing::trace!(hook = hook.name(), "deferring to object clone method");
                    Some(hook.call(value, &[Value::Bool(true)]))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Host arrays are read through their index-keyed entries.
    fn clone_array(&mut self, value: &Value) -> Value {
        let Some(source) = array_elements(value) else {
            return self.clone_generic(value);
        };
        let result: ArrayRef = Rc::new(RefCell::new(source.borrow().clone()));
        for_each_element(&result, |element, index| {
            let copy = self.clone_value(&element);
            if let Some(slot) = result.borrow_mut().get_mut(index) {
                *slot = copy;
            }
        });
        Value::Array(result)
    }

    /// Host nodes, then the generic object rule.
    fn clone_generic(&mut self, value: &Value) -> Value {
        match value {
            Value::Native(native) => self.clone_native(native),
            Value::Object(obj) => self.clone_object(obj),
            _ => value.clone(),
        }
    }

    fn clone_native(&mut self, native: &NativeRef) -> Value {
        if let Some(node) = native.as_host_node().filter(|node| node.node_type().is_some()) {
            tracing::trace!(class = native.class_name(), "delegating to host node clone");
            return node.clone_node(true);
        }
        let mut result = JsObject::new();
        for (key, val) in native.entries() {
            let copy = self.clone_value(&val);
            result.set(key, copy);
        }
        Value::object(result)
    }

    fn clone_object(&mut self, obj: &ObjectRef) -> Value {
        if let Some(copy) = clone_node_like(obj) {
            return copy;
        }
        let mut result = JsObject::with_prototype(prototype_of(obj));
        for key in enumerable_keys(obj) {
            let val = lookup(obj, &key).unwrap_or_default();
            let copy = self.clone_value(&val);
            result.set(key, copy);
        }
        Value::object(result)
    }
}

fn date_of(value: &Value) -> Option<JsDate> {
    match value {
        Value::Date(date) => Some(*date.borrow()),
        Value::Native(native) => native.as_date(),
        _ => None,
    }
}

/// Rebuilds a regular expression from its source and a flag string checked
/// flag by flag. `None` when a host object exposes no pattern.
fn clone_regexp(value: &Value) -> Option<Value> {
    let (source, flags) = match value {
        Value::RegExp(re) => {
            let re = re.borrow();
            (re.source().to_string(), re.flags())
        }
        Value::Native(native) => native.as_regexp()?,
        _ => return None,
    };
    let mut text = String::with_capacity(4);
    if flags.global {
        text.push('g');
    }
    if flags.ignore_case {
        text.push('i');
    }
    if flags.multiline {
        text.push('m');
    }
    if flags.sticky {
        text.push('y');
    }
    match JsRegExp::new(&source, &text) {
        Ok(copy) => Some(Value::regexp(copy)),
        Err(err) => {
            tracing::warn!(%source, %err, "could not rebuild regular expression");
            let Value::RegExp(re) = value else {
                return None;
            };
            let mut copy = re.borrow().clone();
            copy.last_index = 0;
            Some(Value::regexp(copy))
        }
    }
}

/// Plain objects shaped like host nodes: a `nodeType` marker plus a
/// `cloneNode` function.
fn clone_node_like(obj: &ObjectRef) -> Option<Value> {
    if !lookup(obj, "nodeType").is_some_and(|marker| marker.exists()) {
        return None;
    }
    match lookup(obj, "cloneNode") {
        Some(Value::Function(clone_node)) => {
            tracing::trace!("delegating to cloneNode");
            Some(clone_node.call(&Value::Object(Rc::clone(obj)), &[Value::Bool(true)]))
        }
        _ => None,
    }
}

/// The source prototype, or the `prototype` of its `constructor` when the
/// object has none. The constructor may be a function or a plain object.
fn prototype_of(obj: &ObjectRef) -> Option<ObjectRef> {
    if let Some(proto) = obj.borrow().prototype() {
        return Some(proto);
    }
    match lookup(obj, "constructor")? {
        Value::Function(ctor) => ctor.prototype(),
        Value::Object(ctor) => match lookup(&ctor, "prototype")? {
            Value::Object(proto) => Some(proto),
            _ => None,
        },
        _ => None,
    }
}
