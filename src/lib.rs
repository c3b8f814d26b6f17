pub mod context;
pub mod equality;
mod single_cache;

use std::{convert::Infallible, fmt};

pub use context::CallContext;
pub use equality::{are_inputs_equal, AreInputsEqual, Arguments, EqualityFn, SameValueZero};
use single_cache::SingleCache;

/// The only call a `MemoizeOne` remembers.
struct CacheRecord<A, C, R> {
    last_arguments: A,
    last_context: C,
    last_result: R,
}

/// A function wrapped so that it remembers the arguments, context and result
/// of its most recent successful call.
///
/// A call with the same context (by identity, see [`CallContext`]) and with
/// arguments the equality predicate accepts returns the remembered result
/// without calling the function. Any other call computes a new result, which
/// replaces the remembered call as a whole, but only if the computation
/// succeeds: a failing call (either an `Err` or a panic) leaves the cache as
/// it was.
///
/// Calls take `&self`, so the function may call its own wrapper while it
/// runs. Such inner calls never see the outer call, whose result is only
/// stored once it returns. The cache is not thread safe, and the type is not
/// `Sync`.
///
/// Type parameters are the wrapped function `F`, its argument list `A`
/// (usually a tuple), the result `R`, the calling context `C` and the
/// equality predicate `Q`, called as `is_equal(new_arguments,
/// last_arguments)`. The default predicate, [`AreInputsEqual`], requires
/// `A` to implement [`Arguments`].
pub struct MemoizeOne<F, A, R, C = (), Q = AreInputsEqual> {
    target: F,
    is_equal: Q,
    cache: SingleCache<CacheRecord<A, C, R>>,
    name: String,
}

/// Wraps a function of `A` with the default equality predicate.
pub fn memoize_one<F, A, R>(target: F) -> MemoizeOne<F, A, R>
where
    F: Fn(&A) -> R,
{
    MemoizeOne::new(target)
}

impl<F, A, R> MemoizeOne<F, A, R> {
    pub fn new(target: F) -> Self
    where
        F: Fn(&A) -> R,
    {
        Self::build(target)
    }

    /// Wraps a function that may fail. Failures are returned by
    /// [`MemoizeOne::try_call`] and are never cached.
    pub fn fallible<E>(target: F) -> Self
    where
        F: Fn(&A) -> Result<R, E>,
    {
        Self::build(target)
    }
}

impl<F, A, R, C: CallContext> MemoizeOne<F, A, R, C> {
    /// Wraps a function called on a receiver of type `C`.
    pub fn with_context(target: F) -> Self
    where
        F: Fn(&C, &A) -> R,
    {
        Self::build(target)
    }

    pub fn fallible_with_context<E>(target: F) -> Self
    where
        F: Fn(&C, &A) -> Result<R, E>,
    {
        Self::build(target)
    }

    fn build(target: F) -> Self {
        MemoizeOne {
            name: format!("memoized({})", target_name::<F>()),
            target,
            is_equal: AreInputsEqual,
            cache: SingleCache::new(),
        }
    }
}

impl<F, A, R, C, Q> MemoizeOne<F, A, R, C, Q> {
    /// Replaces the equality predicate.
    ///
    /// The predicate is always called with the new arguments first and the
    /// cached ones second.
    pub fn with_equality<Q2>(self, is_equal: Q2) -> MemoizeOne<F, A, R, C, Q2>
    where
        Q2: Fn(&A, &A) -> bool,
    {
        MemoizeOne {
            target: self.target,
            is_equal,
            cache: self.cache,
            name: self.name,
        }
    }

    /// Replaces the name derived from the wrapped function's type.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = format!("memoized({name})");
        self
    }

    /// The display name, `memoized(<function name>)`, or
    /// `memoized(anonymous)` if the wrapped function has no name (closures
    /// and function pointers).
    ///
    /// This is informational only, and relies on `std::any::type_name`,
    /// whose output is not guaranteed to be stable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forgets the cached call, if any.
    pub fn clear(&self) {
        tracing::trace!(name = %self.name, "cache cleared");
        self.cache.clear();
    }

    /// Tells if there is a cached call.
    pub fn is_cached(&self) -> bool {
        !self.cache.is_empty()
    }
}

impl<F, A, R, C, Q> MemoizeOne<F, A, R, C, Q>
where
    R: Clone,
    C: CallContext,
    Q: EqualityFn<A>,
{
    fn memoize<E>(
        &self,
        context: C,
        args: A,
        compute: impl FnOnce(&C, &A) -> Result<R, E>,
    ) -> Result<R, E> {
        if let Some(record) = self.cache.get() {
            if record.last_context.is_same_context(&context)
                && self.is_equal.is_equal(&args, &record.last_arguments)
            {
                tracing::trace!(name = %self.name, "cache hit");
                return Ok(record.last_result.clone());
            }
        }

        tracing::trace!(name = %self.name, "cache miss");

        // Nothing is touched until the result is known, so an error (or a
        // panic) leaves the previous call cached.
        let last_result = compute(&context, &args)?;
        self.cache.set(CacheRecord {
            last_arguments: args,
            last_context: context,
            last_result: last_result.clone(),
        });

        Ok(last_result)
    }
}

impl<F, A, R, Q> MemoizeOne<F, A, R, (), Q>
where
    R: Clone,
    Q: EqualityFn<A>,
{
    pub fn call(&self, args: A) -> R
    where
        F: Fn(&A) -> R,
    {
        match self.memoize((), args, |_, args| {
            Ok::<R, Infallible>((self.target)(args))
        }) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Calls a function built with [`MemoizeOne::fallible`]. An `Err` is
    /// returned as is, and the previously cached call is kept.
    pub fn try_call<E>(&self, args: A) -> Result<R, E>
    where
        F: Fn(&A) -> Result<R, E>,
    {
        self.memoize((), args, |_, args| (self.target)(args))
    }
}

impl<F, A, R, C, Q> MemoizeOne<F, A, R, C, Q>
where
    R: Clone,
    C: CallContext,
    Q: EqualityFn<A>,
{
    /// Calls the function on `context`.
    ///
    /// A cached result is only reused if `context` is the same object the
    /// cached call was made on.
    pub fn call_with(&self, context: C, args: A) -> R
    where
        F: Fn(&C, &A) -> R,
    {
        match self.memoize(context, args, |context, args| {
            Ok::<R, Infallible>((self.target)(context, args))
        }) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    pub fn try_call_with<E>(&self, context: C, args: A) -> Result<R, E>
    where
        F: Fn(&C, &A) -> Result<R, E>,
    {
        self.memoize(context, args, |context, args| (self.target)(context, args))
    }
}

impl<F, A, R, C, Q> fmt::Debug for MemoizeOne<F, A, R, C, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizeOne")
            .field("name", &self.name)
            .field("cached", &self.is_cached())
            .finish()
    }
}

/// Name of a function item, taken from the last segment of its type path.
fn target_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();
    let path = full.split('<').next().unwrap_or(full);

    // Closures ("path::{{closure}}"), function pointers ("fn(..) -> ..") and
    // anything else that isn't a plain path has no usable name.
    if !path
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == ':')
    {
        return "anonymous";
    }

    match path.rsplit("::").next() {
        Some(name) if !name.is_empty() => name,
        _ => "anonymous",
    }
}
