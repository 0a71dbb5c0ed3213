//! app-helpers - runtime helpers over a dynamic value model
//!
//! Type detection, emptiness checks, array iteration and structural cloning
//! for script-like values (objects with prototypes, arrays, dates, regular
//! expressions, functions and host objects).
//!
//! # Example
//!
//! ```
//! use app_helpers::{clone, deep_equal, is_empty, type_of, TypeTag, Value};
//!
//! let config = Value::object_from([
//!     ("name", Value::from("app")),
//!     ("tags", Value::array(vec![Value::from("a"), Value::from("b")])),
//! ]);
//! assert_eq!(type_of(&config), TypeTag::Object);
//! assert!(!is_empty(&config));
//!
//! let copy = clone(&config);
//! assert!(deep_equal(&copy, &config));
//! assert_ne!(copy.get("tags"), config.get("tags"));
//! ```

pub mod error;
pub mod for_each;
pub mod helpers;
pub mod is_empty;
pub mod json;
pub mod type_of;
pub mod value;
pub mod value_clone;
pub mod value_equal;

// Re-exports for convenience
pub use error::{Error, Result};
pub use for_each::for_each;
pub use helpers::Helpers;
pub use is_empty::{is_empty, is_empty_with, IsEmptyOptions, NumberEmptiness};
pub use json::to_json;
pub use type_of::{class_descriptor, type_of, TypeTag};
pub use value::{
    HostNode, JsDate, JsFunction, JsObject, JsRegExp, NativeObject, RegExpFlags, SelfCloning,
    Value,
};
pub use value_clone::clone;
pub use value_equal::deep_equal;

/// Existential check: anything but `undefined` and `null`.
pub fn exists(value: &Value) -> bool {
    value.exists()
}
