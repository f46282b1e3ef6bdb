//! Terminal route handler and the scope it runs in.
//!
//! Once every middleware has handed control onward, the chain yields to the
//! route: the one handler that actually answers the request. The value the
//! route returns is the value every `advance` call — and the original
//! `dispatch` call — resolves to.
//!
//! The receiver *is* the scope. Implement [`Route`] on your router type and
//! the terminal call runs with `&self` bound to it, so a stateful router
//! (connection pools, counters, lookup tables) is just a struct:
//!
//! ```rust
//! use onward::{BoxFuture, Route};
//!
//! struct Router { greeting: &'static str }
//!
//! impl Route<String, Vec<u8>> for Router {
//!     type Output = u16;
//!
//!     fn call(&self, path: String, _body: Vec<u8>) -> BoxFuture<u16> {
//!         let greeting = self.greeting;
//!         Box::pin(async move {
//!             if path == "/hello" { println!("{greeting}"); }
//!             200
//!         })
//!     }
//! }
//! ```
//!
//! For a route with no state of its own, wrap a plain async function with
//! [`route_fn`].

use std::future::Future;
use std::sync::Arc;

use crate::middleware::BoxFuture;

/// The terminal handler invoked when the middleware queue is exhausted.
///
/// `Output` is the result type threaded back through the whole chain; every
/// middleware registered alongside this route must resolve to the same type.
pub trait Route<Rq, Rs>: Send + Sync + 'static {
    type Output: 'static;

    /// Answers the request. `&self` is the scope the route runs in.
    fn call(&self, req: Rq, res: Rs) -> BoxFuture<Self::Output>;
}

/// A long-lived router shared across dispatches routes by delegation, so one
/// `Arc<Router>` can be handed to `dispatch` once per request without
/// rebuilding anything.
impl<Rq, Rs, R> Route<Rq, Rs> for Arc<R>
where
    R: Route<Rq, Rs> + ?Sized,
{
    type Output = R::Output;

    fn call(&self, req: Rq, res: Rs) -> BoxFuture<Self::Output> {
        (**self).call(req, res)
    }
}

// ── Function adapter ──────────────────────────────────────────────────────────

/// A [`Route`] backed by a plain async function. Built with [`route_fn`].
pub struct RouteFn<F>(F);

/// Wraps an async function as a scope-less [`Route`].
///
/// ```rust
/// use onward::route_fn;
///
/// let route = route_fn(|_req: (), _res: ()| async { 200u16 });
/// ```
pub fn route_fn<F>(f: F) -> RouteFn<F> {
    RouteFn(f)
}

impl<F, Fut, Rq, Rs> Route<Rq, Rs> for RouteFn<F>
where
    F: Fn(Rq, Rs) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: 'static,
{
    type Output = Fut::Output;

    fn call(&self, req: Rq, res: Rs) -> BoxFuture<Self::Output> {
        Box::pin((self.0)(req, res))
    }
}
