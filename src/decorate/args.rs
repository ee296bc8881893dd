//! Route argument partitioning.
//!
//! Registration calls take a single ordered argument sequence, like the
//! pipeline's native variadic convention: an optional leading path followed
//! by one or more handlers. [`split_route_args`] is the explicit partitioning
//! rule — no positional guessing.

use std::sync::Arc;

use crate::error::{AsyncwareError, Result};
use crate::handler::{wrap_arc, wrap_error_arc, AsyncErrorHandler, AsyncHandler, Chained};

/// One argument of an async-aware registration call.
pub enum RouteArg<Req, Res> {
    /// Route path or pattern. Allowed only as the leading argument.
    Path(String),
    /// A suspending 3-argument handler.
    Handler(Arc<dyn AsyncHandler<Req, Res>>),
    /// A suspending 4-argument error handler.
    ErrorHandler(Arc<dyn AsyncErrorHandler<Req, Res>>),
}

impl<Req, Res> RouteArg<Req, Res> {
    /// Leading path argument.
    pub fn path(path: impl Into<String>) -> Self {
        RouteArg::Path(path.into())
    }

    /// Trailing handler argument.
    pub fn handler<H>(handler: H) -> Self
    where
        H: AsyncHandler<Req, Res>,
    {
        RouteArg::Handler(Arc::new(handler))
    }

    /// Trailing error handler argument.
    pub fn error_handler<H>(handler: H) -> Self
    where
        H: AsyncErrorHandler<Req, Res>,
    {
        RouteArg::ErrorHandler(Arc::new(handler))
    }
}

impl<Req, Res> From<&str> for RouteArg<Req, Res> {
    fn from(path: &str) -> Self {
        RouteArg::Path(path.to_string())
    }
}

impl<Req, Res> From<String> for RouteArg<Req, Res> {
    fn from(path: String) -> Self {
        RouteArg::Path(path)
    }
}

/// Partition an argument sequence into a non-handler prefix and an adapted
/// handler chain.
///
/// Rules:
/// - at most one path, and only before the first handler,
/// - at least one handler,
/// - handler order is preserved; every handler is adapted on the way through.
pub(crate) fn split_route_args<Req, Res>(
    args: Vec<RouteArg<Req, Res>>,
) -> Result<(Option<String>, Vec<Chained<Req, Res>>)>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    let mut path: Option<String> = None;
    let mut chain = Vec::with_capacity(args.len());

    for arg in args {
        match arg {
            RouteArg::Path(p) => {
                if !chain.is_empty() {
                    return Err(AsyncwareError::InvalidRoute(
                        "path argument after a handler".to_string(),
                    ));
                }
                if path.is_some() {
                    return Err(AsyncwareError::InvalidRoute(
                        "more than one path argument".to_string(),
                    ));
                }
                path = Some(p);
            }
            RouteArg::Handler(h) => chain.push(Chained::Handler(wrap_arc(h))),
            RouteArg::ErrorHandler(h) => chain.push(Chained::ErrorHandler(wrap_error_arc(h))),
        }
    }

    if chain.is_empty() {
        return Err(AsyncwareError::InvalidRoute(
            "at least one handler is required".to_string(),
        ));
    }

    Ok((path, chain))
}
