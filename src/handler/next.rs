//! The continuation handle passed to handlers.
//!
//! The pipeline constructs one [`Next`] per handler invocation. Calling
//! [`Next::proceed`] advances the chain; calling [`Next::fail`] short-circuits
//! to the nearest downstream error handler.
//!
//! All clones of a `Next` share a once-guard: the first signal wins and every
//! later signal is discarded. A handler that calls `next` itself and whose
//! computation fails afterwards therefore produces exactly one signal.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BoxError;

/// Sink the pipeline supplies: `None` advances, `Some(err)` short-circuits.
type Sink = Arc<dyn Fn(Option<BoxError>) + Send + Sync>;

/// Continuation handle for one handler invocation.
///
/// Cheaply cloneable; clones share the same underlying sink and once-guard,
/// so the sink is invoked at most once no matter how many clones exist or
/// from which task they signal.
#[derive(Clone)]
pub struct Next {
    sink: Sink,
    fired: Arc<AtomicBool>,
}

impl Next {
    /// Create a continuation from the pipeline's callback.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(Option<BoxError>) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Advance to the next handler in the chain.
    pub fn proceed(&self) {
        self.signal(None);
    }

    /// Short-circuit to the nearest downstream error handler.
    pub fn fail(&self, err: impl Into<BoxError>) {
        self.signal(Some(err.into()));
    }

    /// Whether this invocation's continuation has already been signaled.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Forward a signal to the sink, first one wins.
    fn signal(&self, outcome: Option<BoxError>) {
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            (self.sink)(outcome);
        }
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("fired", &self.has_fired())
            .finish()
    }
}
