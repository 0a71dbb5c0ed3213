use rustc_hash::FxHashSet;

use crate::value::{enumerable_keys, lookup, ArrayRef, ObjectRef, Value};

/// Performs a deep equality check between two values.
///
/// - Primitives compare with `Object.is` semantics, except `0 == -0`
/// - Arrays compare element by element
/// - Dates compare by instant, regular expressions by source and flags
/// - Objects compare by their enumerable keys (own and inherited) and values
/// - Functions and native objects compare by identity
///
/// A pair of references already under comparison is treated as equal when
/// met again, so cyclic graphs terminate.
///
/// # Examples
///
/// ```
/// use app_helpers::{deep_equal, Value};
///
/// let a = Value::object_from([("foo", Value::array(vec![Value::from(1)]))]);
/// let b = Value::object_from([("foo", Value::array(vec![Value::from(1)]))]);
/// let c = Value::object_from([("foo", Value::array(vec![Value::from(2)]))]);
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    Comparer::default().equal(a, b)
}

#[derive(Default)]
struct Comparer {
    in_progress: FxHashSet<(usize, usize)>,
}

impl Comparer {
    fn equal(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(x), Value::Date(y)) => x.borrow().get_time() == y.borrow().get_time(),
            (Value::RegExp(x), Value::RegExp(y)) => {
                let (x, y) = (x.borrow(), y.borrow());
                x.source() == y.source() && x.flags() == y.flags()
            }
            (Value::Array(x), Value::Array(y)) => a == b || self.nested(a, b, |c| c.arrays(x, y)),
            (Value::Object(x), Value::Object(y)) => {
                a == b || self.nested(a, b, |c| c.objects(x, y))
            }
            // Functions and natives
            _ => a == b,
        }
    }

    fn nested(&mut self, a: &Value, b: &Value, compare: impl FnOnce(&mut Self) -> bool) -> bool {
        let (Some(x), Some(y)) = (a.identity(), b.identity()) else {
            return false;
        };
        if !self.in_progress.insert((x, y)) {
            return true;
        }
        let equal = compare(self);
        self.in_progress.remove(&(x, y));
        equal
    }

    fn arrays(&mut self, x: &ArrayRef, y: &ArrayRef) -> bool {
        let x = x.borrow().clone();
        let y = y.borrow().clone();
        if x.len() != y.len() {
            return false;
        }
        x.iter().zip(&y).all(|(a, b)| self.equal(a, b))
    }

    fn objects(&mut self, x: &ObjectRef, y: &ObjectRef) -> bool {
        let keys_x = enumerable_keys(x);
        let keys_y: FxHashSet<String> = enumerable_keys(y).into_iter().collect();
        if keys_x.len() != keys_y.len() {
            return false;
        }
        keys_x.iter().all(|key| {
            keys_y.contains(key) && {
                let a = lookup(x, key).unwrap_or_default();
                let b = lookup(y, key).unwrap_or_default();
                self.equal(&a, &b)
            }
        })
    }
}
