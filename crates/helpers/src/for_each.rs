use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::type_of::{type_of, TypeTag};
use crate::value::{indexed_elements, ArrayRef, Value};

/// Calls `callback(element, index, sequence)` for every element of
/// `sequence`, in ascending index order, with `context` as `this`.
///
/// The length is read once up front. No borrow of the array is held while
/// the callback runs, so the callback may mutate it; indices that no longer
/// exist are visited with `undefined`. Host objects classified as arrays
/// are visited over their index-keyed entries.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `sequence` is not an array or `callback`
/// is not a function.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use app_helpers::{for_each, Value};
///
/// let sum = Rc::new(RefCell::new(0.0));
/// let acc = Rc::clone(&sum);
/// let add = Value::function("add", 1, move |_, args| {
///     *acc.borrow_mut() += args[0].as_number().unwrap_or(0.0);
///     Value::Undefined
/// });
///
/// let numbers = Value::array(vec![Value::from(1), Value::from(2), Value::from(3)]);
/// for_each(&numbers, &add, &Value::Undefined).unwrap();
/// assert_eq!(*sum.borrow(), 6.0);
/// ```
pub fn for_each(sequence: &Value, callback: &Value, context: &Value) -> Result<()> {
    const NOT_ARRAY: &str = "forEach: first argument must be of type Array!";
    const NOT_FUNCTION: &str = "forEach: second argument must be of type Function!";

    if type_of(sequence) != TypeTag::Array {
        return Err(Error::InvalidArgument(NOT_ARRAY));
    }
    let Value::Function(callback) = callback else {
        return Err(Error::InvalidArgument(NOT_FUNCTION));
    };
    let Some(items) = array_elements(sequence) else {
        return Err(Error::InvalidArgument(NOT_ARRAY));
    };

    for_each_element(&items, |element, index| {
        callback.call(context, &[element, Value::Number(index as f64), sequence.clone()]);
    });
    Ok(())
}

/// Element storage of an array-classified value. Host arrays are read once
/// into a fresh array from their index-keyed entries.
pub(crate) fn array_elements(sequence: &Value) -> Option<ArrayRef> {
    match sequence {
        Value::Array(items) => Some(Rc::clone(items)),
        Value::Native(native) => Some(Rc::new(RefCell::new(indexed_elements(native.as_ref())))),
        _ => None,
    }
}

/// Closure form of [`for_each`] over an array reference.
pub(crate) fn for_each_element(items: &ArrayRef, mut f: impl FnMut(Value, usize)) {
    let len = items.borrow().len();
    for index in 0..len {
        let element = items.borrow().get(index).cloned().unwrap_or_default();
        f(element, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{JsObject, NativeObject};

    type Calls = Rc<RefCell<Vec<(Value, Value, Value, Value)>>>;

    fn recorder() -> (Value, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let callback = Value::function("record", 3, move |this, args| {
            sink.borrow_mut().push((
                this.clone(),
                args[0].clone(),
                args[1].clone(),
                args[2].clone(),
            ));
            Value::Undefined
        });
        (callback, calls)
    }

    #[test]
    fn test_visits_in_order() {
        let arr = Value::array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let (callback, calls) = recorder();
        for_each(&arr, &callback, &Value::Undefined).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 3);
        for (i, (_, element, index, seq)) in calls.iter().enumerate() {
            assert_eq!(*element, Value::from(i as i32 + 1));
            assert_eq!(*index, Value::Number(i as f64));
            assert_eq!(*seq, arr);
        }
    }

    #[test]
    fn test_binds_context() {
        let ctx = Value::object(JsObject::new());
        let (callback, calls) = recorder();
        for_each(&Value::array(vec![Value::Null]), &callback, &ctx).unwrap();
        assert_eq!(calls.borrow()[0].0, ctx);
    }

    #[test]
    fn test_empty_array_never_calls() {
        let (callback, calls) = recorder();
        for_each(&Value::array(vec![]), &callback, &Value::Undefined).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let (callback, _) = recorder();
        for bad in [
            Value::Undefined,
            Value::from("abc"),
            Value::object(JsObject::new()),
        ] {
            let err = for_each(&bad, &callback, &Value::Undefined).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
            assert_eq!(err.to_string(), "forEach: first argument must be of type Array!");
        }
    }

    struct ForeignArray;

    impl NativeObject for ForeignArray {
        fn class_name(&self) -> &str {
            "Array"
        }

        fn entries(&self) -> Vec<(String, Value)> {
            vec![
                ("1".to_string(), Value::from("b")),
                ("0".to_string(), Value::from("a")),
                ("length".to_string(), Value::from(2)),
            ]
        }
    }

    #[test]
    fn test_visits_array_like_native_in_index_order() {
        let foreign = Value::native(ForeignArray);
        let (callback, calls) = recorder();
        for_each(&foreign, &callback, &Value::Undefined).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        for (i, (_, element, index, seq)) in calls.iter().enumerate() {
            assert_eq!(*element, Value::from(["a", "b"][i]));
            assert_eq!(*index, Value::Number(i as f64));
            assert_eq!(*seq, foreign);
        }
    }

    #[test]
    fn test_rejects_non_function() {
        let arr = Value::array(vec![Value::from(1)]);
        let err = for_each(&arr, &Value::from(1), &Value::Undefined).unwrap_err();
        assert_eq!(err.to_string(), "forEach: second argument must be of type Function!");
    }

    #[test]
    fn test_callback_may_mutate_array() {
        let arr = Value::array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let shrink = Value::function("shrink", 3, move |_, args| {
            sink.borrow_mut().push(args[0].clone());
            if let Value::Array(items) = &args[2] {
                items.borrow_mut().pop();
            }
            Value::Undefined
        });
        for_each(&arr, &shrink, &Value::Undefined).unwrap();

        // Length is fixed at the start; removed slots read as undefined.
        assert_eq!(
            *seen.borrow(),
            vec![Value::from(1), Value::from(2), Value::Undefined]
        );
    }
}
