//! Dynamic value model.
//!
//! Primitives are immutable and compared by value. Arrays, dates, regular
//! expressions, objects, functions and native host objects live behind
//! shared references and have identity: cloning a [`Value`] handle copies
//! the reference, never the referent.

mod date;
mod function;
mod native;
mod object;
mod regexp;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use date::JsDate;
pub use function::{JsFunction, NativeFn};
pub use native::{indexed_elements, HostNode, NativeObject, SelfCloning};
pub use object::{enumerable_keys, lookup, JsObject, Property};
pub use regexp::{JsRegExp, RegExpFlags};

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<JsObject>>;
pub type DateRef = Rc<RefCell<JsDate>>;
pub type RegExpRef = Rc<RefCell<JsRegExp>>;
pub type FunctionRef = Rc<JsFunction>;
pub type NativeRef = Rc<dyn NativeObject>;

/// A dynamically typed value.
///
/// `PartialEq` is strict equality: numbers and strings compare by value
/// (`NaN != NaN`), everything else by reference identity. Use
/// [`crate::deep_equal`] for structural comparison.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Function(FunctionRef),
    Array(ArrayRef),
    Date(DateRef),
    RegExp(RegExpRef),
    Object(ObjectRef),
    Native(NativeRef),
}

impl Value {
    /// String value sharing `s`.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Array owning `items`.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Object wrapping `obj`.
    pub fn object(obj: JsObject) -> Self {
        Value::Object(Rc::new(RefCell::new(obj)))
    }

    /// Date holding the instant of `date`.
    pub fn date(date: JsDate) -> Self {
        Value::Date(Rc::new(RefCell::new(date)))
    }

    /// Regular expression wrapping `re`.
    pub fn regexp(re: JsRegExp) -> Self {
        Value::RegExp(Rc::new(RefCell::new(re)))
    }

    /// Function named `name` whose `body` receives `this` and the arguments.
    pub fn function(
        name: impl Into<String>,
        arity: usize,
        body: impl Fn(&Value, &[Value]) -> Value + 'static,
    ) -> Self {
        Value::Function(Rc::new(JsFunction::new(name, arity, body)))
    }

    /// Host object wrapping `native`.
    pub fn native(native: impl NativeObject + 'static) -> Self {
        Value::Native(Rc::new(native))
    }

    /// Plain object built from `(key, value)` pairs, all enumerable.
    pub fn object_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::object(JsObject::from_entries(entries))
    }

    /// Existential check: anything but `undefined` and `null`.
    pub fn exists(&self) -> bool {
        !matches!(self, Value::Undefined | Value::Null)
    }

    /// Address of the referent for reference values, `None` for primitives.
    pub fn identity(&self) -> Option<usize> {
        let addr = match self {
            Value::Function(f) => Rc::as_ptr(f) as *const () as usize,
            Value::Array(a) => Rc::as_ptr(a) as *const () as usize,
            Value::Date(d) => Rc::as_ptr(d) as *const () as usize,
            Value::RegExp(r) => Rc::as_ptr(r) as *const () as usize,
            Value::Object(o) => Rc::as_ptr(o) as *const () as usize,
            Value::Native(n) => Rc::as_ptr(n) as *const () as usize,
            _ => return None,
        };
        Some(addr)
    }

    /// `Object.is` semantics: like strict equality, except `NaN` equals
    /// itself and `0` differs from `-0`.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            _ => self == other,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Property read through the prototype chain. Arrays answer `length`
    /// and numeric indices, functions `name`, `length` and `prototype`;
    /// anything else reads as `undefined`.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(obj) => lookup(obj, key).unwrap_or_default(),
            Value::Array(items) => {
                let items = items.borrow();
                if key == "length" {
                    return Value::Number(items.len() as f64);
                }
                key.parse::<usize>()
                    .ok()
                    .and_then(|idx| items.get(idx).cloned())
                    .unwrap_or_default()
            }
            Value::Native(native) => native
                .entries()
                .into_iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .unwrap_or_default(),
            Value::Function(f) => match key {
                "name" => Value::string(f.name()),
                "length" => Value::Number(f.arity() as f64),
                "prototype" => f.prototype().map_or(Value::Undefined, Value::Object),
                _ => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }

    /// Own property write on an object. Returns `false` for non-objects.
    pub fn set(&self, key: impl Into<String>, value: Value) -> bool {
        match self {
            Value::Object(obj) => {
                obj.borrow_mut().set(key, value);
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

// Shallow on purpose: object graphs may be cyclic.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Function(func) => write!(f, "[Function: {}]", func.name()),
            Value::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array({})", items.len()),
                Err(_) => f.write_str("Array(<borrowed>)"),
            },
            Value::Date(date) => match date.try_borrow() {
                Ok(date) => write!(f, "Date({})", date.to_iso_string()),
                Err(_) => f.write_str("Date(<borrowed>)"),
            },
            Value::RegExp(re) => match re.try_borrow() {
                Ok(re) => write!(f, "/{}/{}", re.source(), re.flags()),
                Err(_) => f.write_str("RegExp(<borrowed>)"),
            },
            Value::Object(obj) => match obj.try_borrow() {
                Ok(obj) => f.debug_set().entries(obj.own_keys()).finish(),
                Err(_) => f.write_str("{<borrowed>}"),
            },
            Value::Native(native) => write!(f, "[object {}]", native.class_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}
