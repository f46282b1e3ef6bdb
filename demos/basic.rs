//! Minimal onward example — the chain a transport would drive per request.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Three middlewares (one deferring behind a timer) each stamp the request
//! on the way through, then a shared router answers it.

use std::sync::Arc;
use std::time::Duration;

use onward::{BoxFuture, Chain, Next, Registration, Route};
use tracing::info;

struct Req {
    path: &'static str,
    iterator: u32,
}

struct Res;

/// The terminal handler. `&self` is the scope the route runs in — a real
/// application would keep its lookup tables or connection pool here.
struct Router;

impl Route<Req, Res> for Router {
    type Output = u16;

    fn call(&self, req: Req, _res: Res) -> BoxFuture<u16> {
        Box::pin(async move {
            info!(path = req.path, middlewares_passed = req.iterator, "request routed");
            200
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut chain: Chain<Req, Res, u16> = Chain::new();

    chain.register_entry(Registration {
        priority: 1,
        middleware: |mut req: Req, res: Res, next: Next<Req, Res, u16>| async move {
            req.iterator += 1;
            info!("step 1");
            next.advance(req, res).await
        },
    });

    chain.register_entry(Registration {
        priority: 2,
        middleware: |mut req: Req, res: Res, next: Next<Req, Res, u16>| async move {
            // A middleware may defer its advance as long as it likes.
            tokio::time::sleep(Duration::from_millis(100)).await;
            req.iterator += 1;
            info!("step 2");
            next.advance(req, res).await
        },
    });

    chain.register_entry(Registration {
        priority: 3,
        middleware: |mut req: Req, res: Res, next: Next<Req, Res, u16>| async move {
            req.iterator += 1;
            info!("step 3");
            next.advance(req, res).await
        },
    });

    let router = Arc::new(Router);

    for path in ["/users/1", "/users/2"] {
        let status = chain
            .dispatch(Req { path, iterator: 0 }, Res, Arc::clone(&router))
            .await;
        info!(path, status, "dispatch finished");
    }
}
