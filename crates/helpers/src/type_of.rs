//! Value classification.
//!
//! Classification goes through the canonical class descriptor
//! (`"[object Array]"`, `"[object Date]"`, ...) rather than the Rust variant,
//! so host objects reporting a built-in class name classify like the
//! built-in.

use serde::Serialize;
use std::fmt;

use crate::value::Value;

/// Classification tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Boolean,
    Number,
    String,
    Function,
    Array,
    Date,
    RegExp,
    Undefined,
    Null,
    Object,
}

const CLASS_TO_TYPE: [(&str, TypeTag); 9] = [
    ("Boolean", TypeTag::Boolean),
    ("Number", TypeTag::Number),
    ("String", TypeTag::String),
    ("Function", TypeTag::Function),
    ("Array", TypeTag::Array),
    ("Date", TypeTag::Date),
    ("RegExp", TypeTag::RegExp),
    ("Undefined", TypeTag::Undefined),
    ("Null", TypeTag::Null),
];

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Function => "function",
            TypeTag::Array => "array",
            TypeTag::Date => "date",
            TypeTag::RegExp => "regexp",
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Object => "object",
        }
    }

    /// Tags whose values are mutable aggregates and get duplicated by
    /// [`crate::clone`].
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            TypeTag::Array | TypeTag::Date | TypeTag::RegExp | TypeTag::Object
        )
    }

    /// Maps a `"[object <Class>]"` descriptor to its tag.
    pub fn from_descriptor(descriptor: &str) -> Option<TypeTag> {
        let class = descriptor.strip_prefix("[object ")?.strip_suffix(']')?;
        CLASS_TO_TYPE
            .iter()
            .find(|(name, _)| *name == class)
            .map(|(_, tag)| *tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical class descriptor of a value, e.g. `"[object Array]"`.
pub fn class_descriptor(value: &Value) -> String {
    let class = match value {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Function(_) => "Function",
        Value::Array(_) => "Array",
        Value::Date(_) => "Date",
        Value::RegExp(_) => "RegExp",
        Value::Object(_) => "Object",
        Value::Native(native) => native.class_name(),
    };
    format!("[object {class}]")
}

/// Classifies a value. Total: anything without a known descriptor is
/// [`TypeTag::Object`].
///
/// # Examples
///
/// ```
/// use app_helpers::{type_of, TypeTag, Value};
///
/// assert_eq!(type_of(&Value::from(3)), TypeTag::Number);
/// assert_eq!(type_of(&Value::array(vec![])), TypeTag::Array);
/// assert_eq!(type_of(&Value::Undefined).as_str(), "undefined");
/// ```
pub fn type_of(value: &Value) -> TypeTag {
    if matches!(value, Value::Undefined) {
        return TypeTag::Undefined;
    }
    TypeTag::from_descriptor(&class_descriptor(value)).unwrap_or(TypeTag::Object)
}
