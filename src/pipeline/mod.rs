//! The contract consumed from the host pipeline.
//!
//! asyncware never implements routing itself. It only needs three things
//! from the pipeline object it augments: a way to ask which registration
//! methods exist, a way to register a chain of callback-style handlers, and
//! a listen/close pair for the server lifecycle. [`Pipeline`] is that
//! contract; [`Registration`] is the statically declared set of method names
//! the decorator knows how to augment.

use std::fmt;

use crate::error::BoxError;
use crate::handler::Chained;

/// A registration method name on the pipeline object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registration {
    /// Middleware registration, no verb constraint.
    Use,
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// Default set of registration methods the decorator augments.
pub const DEFAULT_REGISTRATIONS: [Registration; 8] = [
    Registration::Use,
    Registration::Get,
    Registration::Post,
    Registration::Put,
    Registration::Delete,
    Registration::Patch,
    Registration::Head,
    Registration::Options,
];

impl Registration {
    /// Base method name on the pipeline object.
    pub fn as_str(&self) -> &'static str {
        match self {
            Registration::Use => "use",
            Registration::Get => "get",
            Registration::Post => "post",
            Registration::Put => "put",
            Registration::Delete => "delete",
            Registration::Patch => "patch",
            Registration::Head => "head",
            Registration::Options => "options",
        }
    }

    /// Name of the async-aware variant added by the decorator.
    pub fn async_name(&self) -> &'static str {
        match self {
            Registration::Use => "use_async",
            Registration::Get => "get_async",
            Registration::Post => "post_async",
            Registration::Put => "put_async",
            Registration::Delete => "delete_async",
            Registration::Patch => "patch_async",
            Registration::Head => "head_async",
            Registration::Options => "options_async",
        }
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness callback for the listen operation.
///
/// The pipeline invokes it once: `Ok(())` when the listener is accepting
/// connections, `Err` when binding/startup failed.
pub type ReadyCallback = Box<dyn FnOnce(std::result::Result<(), BoxError>) + Send>;

/// Registration-object contract of the host pipeline.
///
/// Implementations hold an ordered chain of handlers per matched route and
/// invoke them with `(request, response, next)` — or
/// `(error, request, response, next)` for [`Chained::ErrorHandler`] entries
/// when an error is travelling the chain. Registration semantics (chain
/// ordering, path matching) are entirely the implementation's own.
pub trait Pipeline {
    /// Request object handed to each handler invocation.
    type Request: Send + 'static;
    /// Response object handed to each handler invocation.
    type Response: Send + 'static;

    /// Whether this pipeline exposes the given registration method.
    ///
    /// Defaults to `true`; pipelines with a reduced surface override this so
    /// the decorator skips the missing methods.
    fn supports(&self, method: Registration) -> bool {
        let _ = method;
        true
    }

    /// Register a handler chain under the given method and optional path.
    fn register(
        &mut self,
        method: Registration,
        path: Option<String>,
        chain: Vec<Chained<Self::Request, Self::Response>>,
    );

    /// Start listening on the given port, signaling readiness through the
    /// callback exactly once.
    fn listen(&mut self, port: u16, ready: ReadyCallback);

    /// Stop the listener.
    fn close(&mut self);
}
