//! Bench and hook functions
//!
//! Every benchmark body and lifecycle hook is stored as a [`BenchFn`]: a
//! zero-argument operation producing a boxed local future. Synchronous,
//! fallible and async closures are all adapted into the same shape so the
//! executor only ever awaits one kind of thing.

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Future produced by a single invocation of a [`BenchFn`]
pub type BenchFuture = LocalBoxFuture<'static, anyhow::Result<()>>;

/// A zero-argument, possibly asynchronous, operation.
///
/// Cloning is cheap (reference counted); clones invoke the same closure.
#[derive(Clone)]
pub struct BenchFn(Rc<dyn Fn() -> BenchFuture>);

impl BenchFn {
    /// Wrap a synchronous closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self(Rc::new(move || -> BenchFuture {
            f();
            future::ready(Ok(())).boxed_local()
        }))
    }

    /// Wrap a synchronous closure that may fail
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self(Rc::new(move || -> BenchFuture { future::ready(f()).boxed_local() }))
    }

    /// Wrap an async closure
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Self(Rc::new(move || -> BenchFuture { f().map(Ok).boxed_local() }))
    }

    /// Wrap an async closure that may fail
    pub fn try_async<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        Self(Rc::new(move || -> BenchFuture { f().boxed_local() }))
    }

    /// An operation that does nothing (used for `todo` benches)
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Start one invocation
    pub fn call(&self) -> BenchFuture {
        (self.0)()
    }
}

impl fmt::Debug for BenchFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BenchFn(..)")
    }
}
