//! Pipeline decoration - bulk registration of suspending handlers.
//!
//! [`decorate`] takes a pipeline registration object and returns it wrapped
//! in [`Decorated`], which adds an async-aware variant for each registration
//! method the pipeline exposes (`use` → `use_async`, `get` → `get_async`,
//! and so on) plus an awaitable [`Decorated::listen_async`].
//!
//! Each async-aware variant accepts the same argument sequence as its
//! original: an optional leading path followed by one or more handlers. It
//! adapts every handler with [`wrap`](crate::handler::wrap) /
//! [`wrap_error`](crate::handler::wrap_error), preserving order, and
//! delegates to the pipeline's own registration. Registration semantics are
//! never altered here.
//!
//! # Example
//!
//! ```ignore
//! use asyncware::{decorate, RouteArg};
//!
//! let mut app = decorate(server);
//!
//! app.get_async(vec![
//!     "/users".into(),
//!     RouteArg::handler(|req, res, _next| async move {
//!         let users = store.list().await?;
//!         res.send(users);
//!         Ok(())
//!     }),
//! ])?;
//!
//! app.listen_async(3000).await?;
//! ```

mod args;

pub use args::RouteArg;

use tokio::sync::oneshot;

use crate::error::{AsyncwareError, Result};
use crate::pipeline::{Pipeline, Registration, DEFAULT_REGISTRATIONS};

/// Decorate a pipeline with async-aware variants of the default
/// registration methods.
pub fn decorate<P: Pipeline>(pipeline: P) -> Decorated<P> {
    decorate_with(pipeline, &DEFAULT_REGISTRATIONS)
}

/// Decorate a pipeline, augmenting only the given registration methods.
///
/// Methods the pipeline does not expose are skipped without failing; no
/// async-aware variant exists for them afterwards.
pub fn decorate_with<P: Pipeline>(pipeline: P, methods: &[Registration]) -> Decorated<P> {
    let mut augmented = Vec::with_capacity(methods.len());
    for &method in methods {
        if pipeline.supports(method) {
            augmented.push(method);
        } else {
            tracing::debug!(
                method = method.as_str(),
                "pipeline does not expose method, skipping async variant"
            );
        }
    }

    Decorated {
        inner: pipeline,
        augmented,
    }
}

/// A pipeline augmented with async-aware registration variants.
///
/// Everything the inner pipeline could do it can still do, through
/// [`Decorated::inner_mut`]; the decoration only adds capability.
pub struct Decorated<P: Pipeline> {
    inner: P,
    augmented: Vec<Registration>,
}

impl<P: Pipeline> Decorated<P> {
    /// Whether an async-aware variant was added for this method.
    pub fn has_async(&self, method: Registration) -> bool {
        self.augmented.contains(&method)
    }

    /// The registration methods that received an async-aware variant.
    pub fn async_methods(&self) -> &[Registration] {
        &self.augmented
    }

    /// Register suspending handlers through the named method's async-aware
    /// variant.
    ///
    /// Adapts every handler in `args`, preserving order and the optional
    /// leading path, then delegates to the inner pipeline's registration.
    /// Returns [`AsyncwareError::NotDecorated`] if no variant was added for
    /// `method`.
    pub fn register_async(
        &mut self,
        method: Registration,
        args: Vec<RouteArg<P::Request, P::Response>>,
    ) -> Result<()> {
        if !self.has_async(method) {
            return Err(AsyncwareError::NotDecorated(method));
        }

        let (path, chain) = args::split_route_args(args)?;
        tracing::debug!(
            method = method.as_str(),
            path = path.as_deref(),
            handlers = chain.len(),
            "registering adapted handlers"
        );
        self.inner.register(method, path, chain);
        Ok(())
    }

    /// `use` with suspending handlers.
    pub fn use_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Use, args)
    }

    /// `get` with suspending handlers.
    pub fn get_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Get, args)
    }

    /// `post` with suspending handlers.
    pub fn post_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Post, args)
    }

    /// `put` with suspending handlers.
    pub fn put_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Put, args)
    }

    /// `delete` with suspending handlers.
    pub fn delete_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Delete, args)
    }

    /// `patch` with suspending handlers.
    pub fn patch_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Patch, args)
    }

    /// `head` with suspending handlers.
    pub fn head_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Head, args)
    }

    /// `options` with suspending handlers.
    pub fn options_async(&mut self, args: Vec<RouteArg<P::Request, P::Response>>) -> Result<()> {
        self.register_async(Registration::Options, args)
    }

    /// Start listening and suspend until the listener is ready.
    ///
    /// Bridges the pipeline's readiness callback into a future: resolves
    /// `Ok(())` once the listener accepts connections, `Err` if startup
    /// fails or the pipeline drops the callback without signaling. Resolves
    /// exactly once; no retry.
    pub async fn listen_async(&mut self, port: u16) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.listen(
            port,
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );

        match rx.await {
            Ok(Ok(())) => {
                tracing::debug!(port, "listener ready");
                Ok(())
            }
            Ok(Err(err)) => Err(AsyncwareError::Listen(err)),
            Err(_) => Err(AsyncwareError::ListenAborted),
        }
    }

    /// Stop the listener.
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// Access the inner pipeline.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Mutable access to the inner pipeline, e.g. for native registrations.
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    /// Consume the decoration and return the inner pipeline.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::handler::{Chained, HandlerResult, Next};
    use crate::pipeline::ReadyCallback;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    /// What the listen operation should do, for test pipelines.
    enum ListenBehavior {
        Ready,
        Fail,
        DropCallback,
    }

    /// Pipeline double that records registrations verbatim.
    struct RecordingPipeline {
        registered: Vec<(Registration, Option<String>, Vec<Chained<u8, u8>>)>,
        missing: Vec<Registration>,
        listen: ListenBehavior,
    }

    impl RecordingPipeline {
        fn new() -> Self {
            Self {
                registered: Vec::new(),
                missing: Vec::new(),
                listen: ListenBehavior::Ready,
            }
        }

        fn without(mut self, method: Registration) -> Self {
            self.missing.push(method);
            self
        }

        fn listen_behavior(mut self, behavior: ListenBehavior) -> Self {
            self.listen = behavior;
            self
        }
    }

    impl Pipeline for RecordingPipeline {
        type Request = u8;
        type Response = u8;

        fn supports(&self, method: Registration) -> bool {
            !self.missing.contains(&method)
        }

        fn register(
            &mut self,
            method: Registration,
            path: Option<String>,
            chain: Vec<Chained<u8, u8>>,
        ) {
            self.registered.push((method, path, chain));
        }

        fn listen(&mut self, _port: u16, ready: ReadyCallback) {
            match &self.listen {
                ListenBehavior::Ready => ready(Ok(())),
                ListenBehavior::Fail => ready(Err("address in use".into())),
                ListenBehavior::DropCallback => drop(ready),
            }
        }

        fn close(&mut self) {}
    }

    fn spy_next() -> (Next, mpsc::UnboundedReceiver<Option<String>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let next = Next::new(move |outcome: Option<BoxError>| {
            let _ = tx.send(outcome.map(|e| e.to_string()));
        });
        (next, rx)
    }

    async fn proceeding(_req: u8, _res: u8, next: Next) -> HandlerResult {
        next.proceed();
        Ok(())
    }

    async fn failing(_req: u8, _res: u8, _next: Next) -> HandlerResult {
        Err("boom".into())
    }

    #[test]
    fn test_default_set_is_fully_augmented() {
        let app = decorate(RecordingPipeline::new());

        for method in DEFAULT_REGISTRATIONS {
            assert!(app.has_async(method), "missing async variant for {method}");
        }
    }

    #[test]
    fn test_unsupported_methods_are_skipped_silently() {
        let app = decorate(
            RecordingPipeline::new()
                .without(Registration::Head)
                .without(Registration::Options),
        );

        assert!(!app.has_async(Registration::Head));
        assert!(!app.has_async(Registration::Options));
        assert!(app.has_async(Registration::Get));
        assert_eq!(app.async_methods().len(), DEFAULT_REGISTRATIONS.len() - 2);
    }

    #[test]
    fn test_decorate_with_restricts_the_set() {
        let app = decorate_with(RecordingPipeline::new(), &[Registration::Get]);

        assert!(app.has_async(Registration::Get));
        assert!(!app.has_async(Registration::Post));
        assert!(!app.has_async(Registration::Use));
    }

    #[test]
    fn test_register_async_on_missing_variant_errs() {
        let mut app = decorate_with(RecordingPipeline::new(), &[Registration::Get]);

        let err = app
            .use_async(vec![RouteArg::handler(proceeding)])
            .unwrap_err();
        assert!(matches!(err, AsyncwareError::NotDecorated(Registration::Use)));

        // Nothing reached the inner pipeline.
        assert!(app.inner().registered.is_empty());
    }

    #[test]
    fn test_registration_delegates_path_and_method() {
        let mut app = decorate(RecordingPipeline::new());

        app.get_async(vec!["/users".into(), RouteArg::handler(proceeding)])
            .unwrap();

        let (method, path, chain) = &app.inner().registered[0];
        assert_eq!(*method, Registration::Get);
        assert_eq!(path.as_deref(), Some("/users"));
        assert_eq!(chain.len(), 1);
    }

    #[tokio::test]
    async fn test_delegation_preserves_handler_order() {
        let mut app = decorate(RecordingPipeline::new());

        app.use_async(vec![
            RouteArg::handler(proceeding),
            RouteArg::handler(failing),
        ])
        .unwrap();

        let (_, _, chain) = &app.inner().registered[0];
        assert_eq!(chain.len(), 2);

        // First handler behaves like `proceeding`: one signal, no error.
        let (next, mut rx) = spy_next();
        match &chain[0] {
            Chained::Handler(h) => h(0, 0, next).unwrap(),
            Chained::ErrorHandler(_) => panic!("expected a plain handler"),
        }
        let signal = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(signal, Some(None));

        // Second behaves like `failing`: its error reaches the continuation.
        let (next, mut rx) = spy_next();
        match &chain[1] {
            Chained::Handler(h) => h(0, 0, next).unwrap(),
            Chained::ErrorHandler(_) => panic!("expected a plain handler"),
        }
        let signal = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(signal, Some(Some("boom".to_string())));
    }

    #[test]
    fn test_native_surface_stays_reachable() {
        let mut app = decorate(RecordingPipeline::new());

        app.inner_mut()
            .register(Registration::Use, None, Vec::new());
        assert_eq!(app.inner().registered.len(), 1);

        let pipeline = app.into_inner();
        assert_eq!(pipeline.registered.len(), 1);
    }

    #[tokio::test]
    async fn test_listen_async_resolves_when_ready() {
        let mut app = decorate(RecordingPipeline::new());
        app.listen_async(3000).await.unwrap();
    }

    #[tokio::test]
    async fn test_listen_async_surfaces_startup_failure() {
        let mut app =
            decorate(RecordingPipeline::new().listen_behavior(ListenBehavior::Fail));

        let err = app.listen_async(3000).await.unwrap_err();
        assert!(matches!(err, AsyncwareError::Listen(_)));
        assert!(err.to_string().contains("address in use"));
    }

    #[tokio::test]
    async fn test_listen_async_handles_dropped_callback() {
        let mut app =
            decorate(RecordingPipeline::new().listen_behavior(ListenBehavior::DropCallback));

        let err = app.listen_async(3000).await.unwrap_err();
        assert!(matches!(err, AsyncwareError::ListenAborted));
    }
}
