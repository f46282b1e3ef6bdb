//! The advance continuation.
//!
//! [`Next`] is the third argument every middleware receives. Calling
//! [`advance`](Next::advance) hands the request to the next middleware in
//! priority order, or to the terminal route once the queue is exhausted.
//!
//! Nothing advances automatically. A middleware that drops its `Next` ends
//! the chain right there — downstream middlewares and the route never run —
//! and whatever the middleware returns becomes the dispatch result. That is
//! the short-circuit path (failed auth, cache hit, rate limit), and the chain
//! cannot tell it apart from a bug, so a middleware that ends the chain must
//! also finish the response itself.
//!
//! `advance` consumes `self`: each continuation can be called at most once,
//! so a single dispatch can never run the tail of the chain twice.

use std::sync::Arc;

use tracing::trace;

use crate::chain::Entry;
use crate::route::Route;

/// One-shot continuation over a snapshot of the middleware queue.
///
/// Holds the cursor for a single dispatch. Cheap to move into whatever
/// future, timer callback, or task the middleware defers it to — the chain
/// places no constraint on *when* `advance` is called.
pub struct Next<Rq: 'static, Rs: 'static, T: 'static> {
    entries: Arc<[Entry<Rq, Rs, T>]>,
    index: usize,
    route: Arc<dyn Route<Rq, Rs, Output = T>>,
}

impl<Rq: 'static, Rs: 'static, T: 'static> Next<Rq, Rs, T> {
    pub(crate) fn new(
        entries: Arc<[Entry<Rq, Rs, T>]>,
        route: Arc<dyn Route<Rq, Rs, Output = T>>,
    ) -> Self {
        Self { entries, index: 0, route }
    }

    /// Yields control to the next middleware, or to the route if the queue
    /// is exhausted. Resolves to whatever the rest of the chain resolves to.
    pub async fn advance(mut self, req: Rq, res: Rs) -> T {
        match self.entries.get(self.index) {
            Some(entry) => {
                let middleware = Arc::clone(&entry.middleware);
                trace!(index = self.index, priority = entry.priority, "advancing to middleware");
                self.index += 1;
                middleware.call(req, res, self).await
            }
            None => {
                trace!("queue exhausted, invoking route");
                self.route.call(req, res).await
            }
        }
    }
}
