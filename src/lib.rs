//! # asyncware
//!
//! Async handler support for callback-driven middleware pipelines.
//!
//! A callback-driven pipeline invokes each handler with `(request, response,
//! next)` and catches failures either from the handler's synchronous return
//! or from an explicit `next(err)` call. A handler that suspends and fails
//! later misses both channels, so the failure never reaches the pipeline's
//! error chain. This crate bridges the gap:
//!
//! - [`wrap`] / [`wrap_error`] adapt a single suspending handler so its
//!   eventual failure is forwarded to the continuation, exactly once.
//! - [`decorate`] augments a whole pipeline object with async-aware variants
//!   of its registration methods (`use_async`, `get_async`, ...) and an
//!   awaitable `listen_async`.
//!
//! ## Example
//!
//! ```ignore
//! use asyncware::{decorate, RouteArg};
//!
//! #[tokio::main]
//! async fn main() -> asyncware::Result<()> {
//!     let mut app = decorate(server);
//!
//!     // Like `get`, but the handler may suspend; a failure after the
//!     // `.await` still reaches the pipeline's error handlers.
//!     app.get_async(vec![
//!         "*".into(),
//!         RouteArg::handler(|_req, _res, _next| async move {
//!             Err("Oops!".into())
//!         }),
//!     ])?;
//!
//!     // Suspends until the listener is accepting connections.
//!     app.listen_async(3000).await?;
//!     Ok(())
//! }
//! ```

pub mod decorate;
pub mod error;
pub mod handler;
pub mod pipeline;

pub use decorate::{decorate, decorate_with, Decorated, RouteArg};
pub use error::{AsyncwareError, BoxError, Result};
pub use handler::{wrap, wrap_error, HandlerResult, Next};
pub use pipeline::{Pipeline, Registration, DEFAULT_REGISTRATIONS};
