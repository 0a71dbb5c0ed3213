use std::fmt;

use super::{ObjectRef, Value};

/// Body of a callable value: receives `this` and the argument list.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Value;

/// A named callable with a declared arity.
///
/// A function used as a constructor may carry the `prototype` object its
/// instances inherit from.
pub struct JsFunction {
    name: String,
    arity: usize,
    prototype: Option<ObjectRef>,
    body: Box<NativeFn>,
}

impl JsFunction {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        body: impl Fn(&Value, &[Value]) -> Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            prototype: None,
            body: Box::new(body),
        }
    }

    /// Attaches the `prototype` object of a constructor.
    pub fn with_prototype(mut self, prototype: ObjectRef) -> Self {
        self.prototype = Some(prototype);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared parameters; doubles as the function's `length`.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.prototype.clone()
    }

    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        (self.body)(this, args)
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("has_prototype", &self.prototype.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsObject;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_prototype() {
        let plain = JsFunction::new("f", 0, |_, _| Value::Undefined);
        assert!(plain.prototype().is_none());

        let proto = Rc::new(RefCell::new(JsObject::new()));
        let ctor =
            JsFunction::new("Point", 2, |_, _| Value::Undefined).with_prototype(Rc::clone(&proto));
        assert!(Rc::ptr_eq(&ctor.prototype().unwrap(), &proto));
    }
}
