use super::{JsDate, RegExpFlags, Value};

/// Capability of a value that knows how to duplicate itself.
///
/// When present it takes precedence over every structural clone rule.
pub trait SelfCloning {
    fn clone_value(&self, deep: bool) -> Value;
}

/// Capability of a host rendering-tree node.
pub trait HostNode {
    /// Node type marker; `None` means the object is not a live node.
    fn node_type(&self) -> Option<u16>;

    fn clone_node(&self, deep: bool) -> Value;
}

/// An object supplied by the host environment.
///
/// Only `class_name` is required. The capability accessors let the cloner
/// discover [`SelfCloning`] and [`HostNode`] support, and read the instant or
/// pattern behind a foreign date or regular expression, without knowing the
/// concrete type.
pub trait NativeObject {
    /// Host class, e.g. `"HTMLDivElement"`. Rendered as `[object <name>]`.
    fn class_name(&self) -> &str;

    fn as_self_cloning(&self) -> Option<&dyn SelfCloning> {
        None
    }

    fn as_host_node(&self) -> Option<&dyn HostNode> {
        None
    }

    /// The instant, for hosts whose class classifies as a date.
    fn as_date(&self) -> Option<JsDate> {
        None
    }

    /// Source and flags, for hosts whose class classifies as a regexp.
    fn as_regexp(&self) -> Option<(String, RegExpFlags)> {
        None
    }

    /// Enumerable properties, in enumeration order.
    fn entries(&self) -> Vec<(String, Value)> {
        Vec::new()
    }
}

/// Elements of an array-like host object: the entries keyed by an array
/// index, placed at that index. Gaps read as `undefined`.
pub fn indexed_elements(native: &dyn NativeObject) -> Vec<Value> {
    let mut indexed: Vec<(usize, Value)> = native
        .entries()
        .into_iter()
        .filter_map(|(key, val)| Some((array_index(&key)?, val)))
        .collect();
    indexed.sort_by_key(|(index, _)| *index);
    let len = indexed.last().map_or(0, |(index, _)| index + 1);
    let mut elements = vec![Value::Undefined; len];
    for (index, val) in indexed {
        elements[index] = val;
    }
    elements
}

/// Canonical decimal array index: no sign, no leading zeros.
fn array_index(key: &str) -> Option<usize> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}
