//! Handler module - handler shapes and the async-to-callback adapter.
//!
//! Provides:
//! - [`Next`] - the continuation handle supplied per handler invocation
//! - [`AsyncHandler`] / [`AsyncErrorHandler`] - suspending handler traits
//! - [`wrap`] / [`wrap_error`] - adapt a suspending handler into the
//!   pipeline's callback-style shape
//!
//! # Example
//!
//! ```ignore
//! use asyncware::handler::{wrap, HandlerResult, Next};
//!
//! // A suspending route handler. Its eventual failure is routed to `next`
//! // by the wrapper, so the pipeline's error chain sees it.
//! async fn lookup(req: Request, res: Response, _next: Next) -> HandlerResult {
//!     let record = store.fetch(&req).await?;
//!     res.send(record);
//!     Ok(())
//! }
//!
//! let adapted = wrap(lookup);
//! ```

mod next;
mod wrap;

pub use next::Next;
pub use wrap::{wrap, wrap_error};

pub(crate) use wrap::{wrap_arc, wrap_error_arc};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::BoxError;

/// Result type for handler functions.
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for suspending 3-argument handlers: `(request, response, next)`.
///
/// Implemented for any `Fn(Req, Res, Next) -> Fut` closure or async fn.
pub trait AsyncHandler<Req, Res>: Send + Sync + 'static {
    /// Build the handler's computation for one invocation.
    fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut, Req, Res> AsyncHandler<Req, Res> for F
where
    F: Fn(Req, Res, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, req: Req, res: Res, next: Next) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self)(req, res, next))
    }
}

/// Trait for suspending 4-argument error handlers:
/// `(error, request, response, next)`.
///
/// The leading error argument keeps error handlers distinguishable from
/// plain handlers, so the pipeline's arity-based dispatch still works.
pub trait AsyncErrorHandler<Req, Res>: Send + Sync + 'static {
    /// Build the error handler's computation for one invocation.
    fn call(&self, err: BoxError, req: Req, res: Res, next: Next)
        -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut, Req, Res> AsyncErrorHandler<Req, Res> for F
where
    F: Fn(BoxError, Req, Res, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(
        &self,
        err: BoxError,
        req: Req,
        res: Res,
        next: Next,
    ) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self)(err, req, res, next))
    }
}

/// Callback-style 3-argument handler, as the pipeline invokes it.
///
/// Completes synchronously: `Err` is the synchronous failure channel the
/// pipeline catches itself; anything later must go through [`Next`].
pub type HandlerFn<Req, Res> = Arc<dyn Fn(Req, Res, Next) -> HandlerResult + Send + Sync>;

/// Callback-style 4-argument error handler, as the pipeline invokes it.
pub type ErrorHandlerFn<Req, Res> =
    Arc<dyn Fn(BoxError, Req, Res, Next) -> HandlerResult + Send + Sync>;

/// A handler ready to be registered in a pipeline chain.
///
/// The two variants preserve the 3-arg / 4-arg distinction that the
/// pipeline uses to decide whether a chain entry handles errors.
pub enum Chained<Req, Res> {
    /// Plain handler, invoked while the chain has no pending error.
    Handler(HandlerFn<Req, Res>),
    /// Error handler, invoked only when an error is travelling the chain.
    ErrorHandler(ErrorHandlerFn<Req, Res>),
}

impl<Req, Res> Chained<Req, Res> {
    /// Whether this entry is a 4-argument error handler.
    pub fn is_error_handler(&self) -> bool {
        matches!(self, Chained::ErrorHandler(_))
    }
}

impl<Req, Res> std::fmt::Debug for Chained<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chained::Handler(_) => f.write_str("Handler"),
            Chained::ErrorHandler(_) => f.write_str("ErrorHandler"),
        }
    }
}

impl<Req, Res> Clone for Chained<Req, Res> {
    fn clone(&self) -> Self {
        match self {
            Chained::Handler(h) => Chained::Handler(h.clone()),
            Chained::ErrorHandler(h) => Chained::ErrorHandler(h.clone()),
        }
    }
}
