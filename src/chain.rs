//! The middleware chain: registration, ordering, and dispatch.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::middleware::{BoxedMiddleware, Middleware};
use crate::next::Next;
use crate::route::Route;

/// One registered middleware and its ordering key.
///
/// Owned exclusively by the chain; immutable once inserted except for its
/// position in the queue.
pub(crate) struct Entry<Rq: 'static, Rs: 'static, T: 'static> {
    pub(crate) middleware: BoxedMiddleware<Rq, Rs, T>,
    pub(crate) priority: i32,
}

impl<Rq: 'static, Rs: 'static, T: 'static> Clone for Entry<Rq, Rs, T> {
    fn clone(&self) -> Self {
        Self { middleware: Arc::clone(&self.middleware), priority: self.priority }
    }
}

/// The descriptor registration shape: priority and middleware in one value.
///
/// Sugar for [`Chain::register`] — see [`Chain::register_entry`].
pub struct Registration<M> {
    pub priority: i32,
    pub middleware: M,
}

/// A priority-ordered middleware chain.
///
/// `Rq` and `Rs` are whatever request/response types your transport hands
/// you — the chain never looks inside them. `T` is the type the terminal
/// [`Route`] resolves to, threaded back through every middleware.
///
/// Build the chain once at startup, then share it behind an `Arc`:
/// registration takes `&mut self`, dispatch takes `&self`, and each dispatch
/// walks its own snapshot of the queue, so any number of requests can run
/// through one chain concurrently without locking.
///
/// ```rust
/// use onward::{Chain, Next, route_fn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut chain: Chain<u32, (), u16> = Chain::new();
///
/// chain.register(
///     |req: u32, res: (), next: Next<u32, (), u16>| async move {
///         next.advance(req + 1, res).await
///     },
///     10,
/// );
///
/// let status = chain
///     .dispatch(41, (), route_fn(|req: u32, _res: ()| async move {
///         assert_eq!(req, 42);
///         200u16
///     }))
///     .await;
/// assert_eq!(status, 200);
/// # }
/// ```
pub struct Chain<Rq: 'static, Rs: 'static, T: 'static> {
    entries: Arc<[Entry<Rq, Rs, T>]>,
}

impl<Rq: 'static, Rs: 'static, T: 'static> Chain<Rq, Rs, T> {
    pub fn new() -> Self {
        Self { entries: Vec::new().into() }
    }

    /// Registers a middleware at the given priority. Returns the new queue
    /// length, so setup code can assert how many middlewares are in place.
    ///
    /// Lower priority runs earlier. Priorities need not be unique or
    /// contiguous; the queue is re-sorted from scratch after every insertion
    /// with a stable sort, so equal priorities keep registration order.
    ///
    /// Registration is setup-time work: it replaces the queue snapshot and
    /// must not race with itself, while dispatches only ever read.
    pub fn register(&mut self, middleware: impl Middleware<Rq, Rs, T>, priority: i32) -> usize {
        let mut entries = self.entries.to_vec();
        entries.push(Entry { middleware: middleware.into_boxed_middleware(), priority });
        entries.sort_by(|a, b| a.priority.cmp(&b.priority));
        debug!(priority, total = entries.len(), "middleware registered");
        self.entries = entries.into();
        self.entries.len()
    }

    /// Registers from a [`Registration`] descriptor. Identical to
    /// [`register`](Chain::register) with the fields split out.
    pub fn register_entry<M>(&mut self, registration: Registration<M>) -> usize
    where
        M: Middleware<Rq, Rs, T>,
    {
        self.register(registration.middleware, registration.priority)
    }

    /// Number of registered middlewares.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs one request through the chain.
    ///
    /// Snapshots the queue, then invokes the first middleware with the
    /// request, the response, and a [`Next`] continuation. Each middleware
    /// decides whether to hand control onward; when the queue is exhausted
    /// the `route` answers with `&self` as its scope, and its result resolves
    /// back through every middleware to here.
    ///
    /// The chain owns no scheduler and sets no deadline: the returned future
    /// runs on whatever drives it, and a middleware that never advances
    /// stalls this dispatch (and only this dispatch) forever.
    pub async fn dispatch<R>(&self, req: Rq, res: Rs, route: R) -> T
    where
        R: Route<Rq, Rs, Output = T>,
    {
        trace!(queued = self.entries.len(), "dispatch started");
        Next::new(Arc::clone(&self.entries), Arc::new(route))
            .advance(req, res)
            .await
    }

    #[cfg(test)]
    fn priorities(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.priority).collect()
    }
}

impl<Rq: 'static, Rs: 'static, T: 'static> Default for Chain<Rq, Rs, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop(req: (), res: (), next: Next<(), (), u16>) -> u16 {
        next.advance(req, res).await
    }

    #[test]
    fn register_reports_queue_length() {
        let mut chain = Chain::new();
        assert_eq!(chain.register(noop, 1), 1);
        assert_eq!(chain.register(noop, 2), 2);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn queue_is_resorted_on_every_insert() {
        let mut chain = Chain::new();
        chain.register(noop, 30);
        chain.register(noop, -5);
        chain.register(noop, 30);
        chain.register(noop, 12);
        assert_eq!(chain.priorities(), [-5, 12, 30, 30]);
    }

    #[test]
    fn descriptor_form_matches_positional_form() {
        let mut chain = Chain::new();
        assert_eq!(chain.register_entry(Registration { priority: 7, middleware: noop }), 1);
        assert_eq!(chain.register(noop, 3), 2);
        assert_eq!(chain.priorities(), [3, 7]);
    }

    #[test]
    fn empty_chain_is_empty() {
        let chain: Chain<(), (), u16> = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }
}
