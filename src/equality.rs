//! The default argument comparison.
//!
//! Arguments are compared shallowly, position by position. Plain values are
//! compared by value (string slices included), references and shared
//! pointers by identity, and
//! floating point numbers with the "did this value change" rule: `NaN` is
//! the same as `NaN`, while `0.0` and `-0.0` are different. Nothing is ever
//! compared structurally; callers that need that supply their own predicate.

use std::{rc::Rc, sync::Arc};

use num_traits::Float;

/// Single argument comparison used by [`are_inputs_equal`].
pub trait SameValueZero {
    fn same_value_zero(&self, other: &Self) -> bool;
}

fn float_same_value_zero<T: Float>(a: T, b: T) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}

impl SameValueZero for f32 {
    fn same_value_zero(&self, other: &Self) -> bool {
        float_same_value_zero(*self, *other)
    }
}

impl SameValueZero for f64 {
    fn same_value_zero(&self, other: &Self) -> bool {
        float_same_value_zero(*self, *other)
    }
}

macro_rules! same_value_by_eq {
    ($($t:ty),*) => {
        $(
            impl SameValueZero for $t {
                fn same_value_zero(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

same_value_by_eq!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, (), str, String
);

/// References are the same only if they point to the same object.
impl<T> SameValueZero for &T {
    fn same_value_zero(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

/// String slices are values, wherever they are stored.
impl SameValueZero for &str {
    fn same_value_zero(&self, other: &Self) -> bool {
        *self == *other
    }
}

impl<T: ?Sized> SameValueZero for Rc<T> {
    fn same_value_zero(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> SameValueZero for Arc<T> {
    fn same_value_zero(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: SameValueZero> SameValueZero for Option<T> {
    fn same_value_zero(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value_zero(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// An ordered list of arguments, as passed to a memoized function.
///
/// Tuples have their length fixed by the type. Slices, arrays and vectors
/// may differ in length, which makes them unequal.
pub trait Arguments {
    /// Tells if `self`, the new arguments, match `last`, the arguments of the
    /// cached call.
    fn inputs_equal(&self, last: &Self) -> bool;
}

macro_rules! tuple_arguments {
    ($($name:ident $idx:tt),*) => {
        impl<$($name: SameValueZero),*> Arguments for ($($name,)*) {
            #[allow(unused_variables)]
            fn inputs_equal(&self, last: &Self) -> bool {
                true $(&& self.$idx.same_value_zero(&last.$idx))*
            }
        }
    };
}

tuple_arguments!();
tuple_arguments!(A 0);
tuple_arguments!(A 0, B 1);
tuple_arguments!(A 0, B 1, C 2);
tuple_arguments!(A 0, B 1, C 2, D 3);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
tuple_arguments!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

impl<T: SameValueZero> Arguments for [T] {
    fn inputs_equal(&self, last: &Self) -> bool {
        self.len() == last.len()
            && self
                .iter()
                .zip(last)
                .all(|(new_arg, last_arg)| new_arg.same_value_zero(last_arg))
    }
}

impl<T: SameValueZero, const N: usize> Arguments for [T; N] {
    fn inputs_equal(&self, last: &Self) -> bool {
        self[..].inputs_equal(&last[..])
    }
}

impl<T: SameValueZero> Arguments for Vec<T> {
    fn inputs_equal(&self, last: &Self) -> bool {
        self.as_slice().inputs_equal(last.as_slice())
    }
}

impl<T: SameValueZero> Arguments for Box<[T]> {
    fn inputs_equal(&self, last: &Self) -> bool {
        (**self).inputs_equal(&**last)
    }
}

/// The default equality predicate of a memoized function.
pub fn are_inputs_equal<A: Arguments + ?Sized>(new_args: &A, last_args: &A) -> bool {
    new_args.inputs_equal(last_args)
}

/// Decides if a call with `new_args` can reuse the result cached for
/// `last_args`.
///
/// Implemented by any `Fn(&A, &A) -> bool`. Predicates need not be
/// symmetric: they are always given the new arguments first.
pub trait EqualityFn<A: ?Sized> {
    fn is_equal(&self, new_args: &A, last_args: &A) -> bool;
}

impl<A: ?Sized, T: Fn(&A, &A) -> bool> EqualityFn<A> for T {
    fn is_equal(&self, new_args: &A, last_args: &A) -> bool {
        self(new_args, last_args)
    }
}

/// [`are_inputs_equal`] as an [`EqualityFn`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AreInputsEqual;

impl<A: Arguments + ?Sized> EqualityFn<A> for AreInputsEqual {
    fn is_equal(&self, new_args: &A, last_args: &A) -> bool {
        are_inputs_equal(new_args, last_args)
    }
}
