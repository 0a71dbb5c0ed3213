use crate::value::Value;

/// How numbers answer [`is_empty_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberEmptiness {
    /// Every number is empty: a bare number has no length and owns no
    /// properties.
    #[default]
    Always,
    /// Only `0` (and `-0`) is empty.
    ZeroOnly,
    /// No number is empty.
    Never,
}

/// Options for emptiness checks.
#[derive(Debug, Clone, Default)]
pub struct IsEmptyOptions {
    /// Policy for numbers. Default is [`NumberEmptiness::Always`].
    pub numbers: NumberEmptiness,
}

/// Checks if a value is empty, with default options.
///
/// `undefined` and `null` are empty, booleans never are. Strings, arrays and
/// functions are empty when their length (arity, for functions) is 0.
/// Objects are empty when they own no properties at all, enumerable or not.
///
/// # Examples
///
/// ```
/// use app_helpers::{is_empty, Value};
///
/// assert!(is_empty(&Value::object_from::<&str, _>([])));
/// assert!(is_empty(&Value::from("")));
/// assert!(!is_empty(&Value::array(vec![Value::from(1)])));
/// assert!(!is_empty(&Value::Bool(false)));
/// ```
pub fn is_empty(value: &Value) -> bool {
    is_empty_with(value, &IsEmptyOptions::default())
}

/// Checks if a value is empty under the given options.
pub fn is_empty_with(value: &Value, options: &IsEmptyOptions) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::Bool(_) => false,
        Value::Number(n) => match options.numbers {
            NumberEmptiness::Always => true,
            NumberEmptiness::ZeroOnly => *n == 0.0,
            NumberEmptiness::Never => false,
        },
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.borrow().is_empty(),
        Value::Function(f) => f.arity() == 0,
        Value::Object(obj) => obj.borrow().own_len() == 0,
        Value::Date(_) => true,
        // `lastIndex` is an own property of every regular expression.
        Value::RegExp(_) => false,
        Value::Native(native) => native.entries().is_empty(),
    }
}
