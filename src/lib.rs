//! # onward
//!
//! A priority-ordered middleware chain for async Rust services.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your transport accepts connections, parses requests, enforces timeouts,
//! and renders failures. Your router answers requests. onward owns the part
//! in between — the ordered handoff — and nothing else:
//!
//! - **Ordering** — middlewares run in ascending priority, ties in
//!   registration order, re-sorted on every insert
//! - **Handoff** — each middleware explicitly yields via [`Next::advance`];
//!   nothing advances on its own
//! - **Propagation** — the terminal [`Route`]'s result threads back through
//!   every middleware to the `dispatch` caller
//!
//! What onward deliberately does not do:
//!
//! - **No scheduler** — `dispatch` is a plain future; your runtime drives it
//! - **No timeouts** — a middleware that never advances stalls its own
//!   dispatch; deadline enforcement belongs to the transport
//! - **No recovery** — a panicking middleware unwinds straight to the
//!   `dispatch` caller, unwrapped and unlogged
//!
//! ## Quick start
//!
//! ```rust
//! use onward::{Chain, Next, route_fn};
//!
//! struct Req { authorized: bool }
//! struct Res;
//!
//! async fn auth(req: Req, res: Res, next: Next<Req, Res, u16>) -> u16 {
//!     if !req.authorized {
//!         return 401; // chain ends here, route never runs
//!     }
//!     next.advance(req, res).await
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut chain = Chain::new();
//!     chain.register(auth, 10);
//!
//!     let status = chain
//!         .dispatch(
//!             Req { authorized: true },
//!             Res,
//!             route_fn(|_req: Req, _res: Res| async { 200u16 }),
//!         )
//!         .await;
//!     assert_eq!(status, 200);
//! }
//! ```

mod chain;
mod middleware;
mod next;
mod route;

pub use chain::{Chain, Registration};
pub use middleware::{BoxFuture, Middleware};
pub use next::Next;
pub use route::{Route, RouteFn, route_fn};
