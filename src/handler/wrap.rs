//! The async-to-callback handler adapter.
//!
//! A callback-driven pipeline catches failures in exactly two places: the
//! handler's synchronous return, and an explicit call to the continuation.
//! A handler that suspends and fails later misses both, so the failure is
//! lost. [`wrap`] and [`wrap_error`] close that gap: they spawn the
//! handler's computation and attach a failure observer that forwards the
//! error to the continuation.
//!
//! On the success path the wrapper does nothing. The source handler alone
//! decides whether to call `next` (to advance the chain) or not (when it
//! already sent a response). The continuation's once-guard ensures a single
//! signal per invocation even when the handler signals and its computation
//! fails afterwards.

use std::sync::Arc;

use super::{AsyncErrorHandler, AsyncHandler, ErrorHandlerFn, HandlerFn, Next};
use crate::error::BoxError;

/// Adapt a suspending 3-argument handler into the pipeline's callback shape.
///
/// The adapted handler builds the source handler's future with the same
/// arguments, spawns it onto the ambient tokio runtime, and returns `Ok(())`
/// synchronously. If the future resolves to an error, the error is forwarded
/// to `next` exactly once.
///
/// # Panics
///
/// The adapted handler panics if invoked outside a tokio runtime.
pub fn wrap<Req, Res, H>(handler: H) -> HandlerFn<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
    H: AsyncHandler<Req, Res>,
{
    wrap_arc(Arc::new(handler))
}

/// Adapt a suspending 4-argument error handler. Same bridging behavior as
/// [`wrap`], with the chain's pending error as the leading argument.
pub fn wrap_error<Req, Res, H>(handler: H) -> ErrorHandlerFn<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
    H: AsyncErrorHandler<Req, Res>,
{
    wrap_error_arc(Arc::new(handler))
}

pub(crate) fn wrap_arc<Req, Res>(handler: Arc<dyn AsyncHandler<Req, Res>>) -> HandlerFn<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    Arc::new(move |req: Req, res: Res, next: Next| {
        let fut = handler.call(req, res, next.clone());
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                next.fail(err);
            }
        });
        Ok(())
    })
}

pub(crate) fn wrap_error_arc<Req, Res>(
    handler: Arc<dyn AsyncErrorHandler<Req, Res>>,
) -> ErrorHandlerFn<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    Arc::new(move |err: BoxError, req: Req, res: Res, next: Next| {
        let fut = handler.call(err, req, res, next.clone());
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                next.fail(err);
            }
        });
        Ok(())
    })
}
