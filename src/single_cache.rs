use std::{cell::RefCell, rc::Rc};

/// Caches at most one value.
///
/// The value is always replaced as a whole, and no borrow of the slot
/// outlives a method call, so code running while a value is being computed
/// (even code that reaches back into this same slot) never observes a
/// half-written entry nor trips over an active borrow.
pub struct SingleCache<T>(RefCell<Option<Rc<T>>>);

impl<T> SingleCache<T> {
    pub fn new() -> Self {
        SingleCache(RefCell::new(None))
    }

    /// Shared handle to the cached value, if any.
    pub fn get(&self) -> Option<Rc<T>> {
        self.0.borrow().clone()
    }

    /// Stores `value`, dropping the previous one.
    pub fn set(&self, value: T) {
        let previous = self.0.replace(Some(Rc::new(value)));
        // The slot must be released before running the old value's
        // destructor, which may be arbitrary user code.
        drop(previous);
    }

    pub fn clear(&self) {
        let previous = self.0.take();
        drop(previous);
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_none()
    }
}
