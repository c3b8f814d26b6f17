use std::{rc::Rc, sync::Arc};

/// The receiver a memoized function is called on.
///
/// Two contexts are the same only if they are the very same object: two
/// distinct objects with equal contents are different contexts. Since a
/// cached call keeps its context (a borrow or a strong reference), the object
/// can't be freed and have its address reused while it is cached.
pub trait CallContext {
    fn is_same_context(&self, other: &Self) -> bool;
}

/// Functions called without a receiver.
impl CallContext for () {
    fn is_same_context(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: ?Sized> CallContext for &T {
    fn is_same_context(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> CallContext for Rc<T> {
    fn is_same_context(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> CallContext for Arc<T> {
    fn is_same_context(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}
