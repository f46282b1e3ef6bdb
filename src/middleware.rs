//! Middleware trait and type erasure.
//!
//! # How async middlewares are stored
//!
//! The chain needs to hold middlewares of *different* types in a single
//! sorted queue. Rust collections can only hold one concrete type, so we use
//! **trait objects** (`dyn ErasedMiddleware`) to hide the concrete middleware
//! type behind a common interface and store everything uniformly.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn auth(req, res, next) -> u16 { … }       ← user writes this
//!        ↓ chain.register(auth, 10)
//! auth.into_boxed_middleware()                     ← Middleware blanket impl
//!        ↓
//! Arc::new(FnMiddleware(auth))                     ← heap-allocated wrapper
//!        ↓  stored as BoxedMiddleware = Arc<dyn ErasedMiddleware>
//! middleware.call(req, res, next)  at dispatch     ← one vtable dispatch
//!        ↓
//! Box::pin(auth(req, res, next))                   ← BoxFuture
//! ```
//!
//! The only runtime cost per chain step is **one Arc clone** (atomic inc) +
//! **one virtual call** — negligible compared to the work a middleware does.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::next::Next;

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to `T`.
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place — it cannot move it in memory after the first poll.
/// `Send + 'static` let multi-threaded runtimes move the future across
/// threads safely.
///
/// Public because it appears in [`Route::call`](crate::Route::call), which
/// downstream crates implement directly.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Middleware` trait's `into_boxed_middleware`
/// method. External crates cannot usefully interact with this trait.
#[doc(hidden)]
pub trait ErasedMiddleware<Rq: 'static, Rs: 'static, T: 'static> {
    fn call(&self, req: Rq, res: Rs, next: Next<Rq, Rs, T>) -> BoxFuture<T>;
}

/// A heap-allocated, type-erased middleware shared across concurrent
/// dispatches.
///
/// `#[doc(hidden)] pub` for the same reason as `ErasedMiddleware`.
/// `Arc` gives us cheap, thread-safe shared ownership (one atomic reference
/// count increment per chain step) without copying the middleware.
#[doc(hidden)]
pub type BoxedMiddleware<Rq, Rs, T> =
    Arc<dyn ErasedMiddleware<Rq, Rs, T> + Send + Sync + 'static>;

// ── Public Middleware trait ───────────────────────────────────────────────────

/// Implemented for every valid middleware.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Rq, res: Rs, next: Next<Rq, Rs, T>) -> T
/// ```
///
/// The three-parameter shape is the whole contract: a middleware receives the
/// request, the response, and the [`Next`] continuation, and must either
/// `next.advance(req, res).await` to hand control onward or return its own
/// value to end the chain early.
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it. Anything that is not a three-parameter
/// async callable is rejected at compile time, so a mis-shaped middleware is
/// a build failure, not a registration-time error.
pub trait Middleware<Rq: 'static, Rs: 'static, T: 'static>:
    private::Sealed<Rq, Rs, T> + Send + Sync + 'static
{
    #[doc(hidden)]
    fn into_boxed_middleware(self) -> BoxedMiddleware<Rq, Rs, T>;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Middleware` on their own types.
mod private {
    pub trait Sealed<Rq, Rs, T> {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Implement the sealing trait for any function with the right signature.
///
/// `Fn(Rq, Rs, Next) -> Fut` covers:
///   - named `async fn` items
///   - closures returning `async move` blocks
///   - any struct that implements `Fn`
impl<F, Fut, Rq, Rs, T> private::Sealed<Rq, Rs, T> for F
where
    F: Fn(Rq, Rs, Next<Rq, Rs, T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    Rq: 'static,
    Rs: 'static,
    T: 'static,
{
}

/// Implement `Middleware` for any function with the right signature.
impl<F, Fut, Rq, Rs, T> Middleware<Rq, Rs, T> for F
where
    F: Fn(Rq, Rs, Next<Rq, Rs, T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    Rq: 'static,
    Rs: 'static,
    T: 'static,
{
    fn into_boxed_middleware(self) -> BoxedMiddleware<Rq, Rs, T> {
        Arc::new(FnMiddleware(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete middleware `F` and implements
/// [`ErasedMiddleware`], bridging the typed world to the trait-object world.
struct FnMiddleware<F>(F);

impl<F, Fut, Rq, Rs, T> ErasedMiddleware<Rq, Rs, T> for FnMiddleware<F>
where
    F: Fn(Rq, Rs, Next<Rq, Rs, T>) -> Fut + Send + Sync,
    Fut: Future<Output = T> + Send + 'static,
    Rq: 'static,
    Rs: 'static,
    T: 'static,
{
    fn call(&self, req: Rq, res: Rs, next: Next<Rq, Rs, T>) -> BoxFuture<T> {
        // Call the wrapped function — this returns the concrete `Fut`.
        // Boxing it makes the return type match the trait signature.
        Box::pin((self.0)(req, res, next))
    }
}
