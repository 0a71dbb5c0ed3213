use crate::is_empty::{is_empty_with, IsEmptyOptions};
use crate::type_of::{type_of, TypeTag};
use crate::value::Value;
use crate::value_clone;

/// Named entry points over the helper functions.
///
/// Holds the configuration the helpers accept; with [`Helpers::default`]
/// every call behaves like the corresponding free function.
///
/// # Examples
///
/// ```
/// use app_helpers::{Helpers, IsEmptyOptions, NumberEmptiness, TypeTag, Value};
///
/// let helpers = Helpers::new(IsEmptyOptions { numbers: NumberEmptiness::ZeroOnly });
/// assert!(helpers.is_empty(&Value::from(0)));
/// assert!(!helpers.is_empty(&Value::from(7)));
/// assert_eq!(helpers.type_of(&Value::from("x")), TypeTag::String);
/// ```
#[derive(Debug, Default)]
pub struct Helpers {
    options: IsEmptyOptions,
}

impl Helpers {
    pub fn new(options: IsEmptyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IsEmptyOptions {
        &self.options
    }

    pub fn is_empty(&self, value: &Value) -> bool {
        is_empty_with(value, &self.options)
    }

    pub fn type_of(&self, value: &Value) -> TypeTag {
        type_of(value)
    }

    pub fn clone(&self, value: &Value) -> Value {
        value_clone::clone(value)
    }
}
