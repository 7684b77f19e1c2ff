//! Redirect handling
//!
//! By default every redirect the transport permits is followed and each hop
//! is recorded. A caller-supplied [`RedirectPolicy`] replaces that wholesale:
//! its decisions are authoritative and no hops are recorded.

use std::fmt;
use std::sync::{Arc, Mutex};

use reqwest::redirect::{Action, Attempt, Policy};

/// Caller-supplied redirect hook, invoked once per redirect attempt
#[derive(Clone)]
pub struct RedirectPolicy(Arc<dyn Fn(Attempt) -> Action + Send + Sync + 'static>);

impl RedirectPolicy {
    /// Wrap a redirect decision function
    ///
    /// The hook receives each [`Attempt`] and returns whether to follow,
    /// stop, or fail.
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(Attempt) -> Action + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub(crate) fn to_policy(&self) -> Policy {
        let hook = Arc::clone(&self.0);
        Policy::custom(move |attempt| hook(attempt))
    }
}

impl fmt::Debug for RedirectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RedirectPolicy(..)")
    }
}

/// Per-call accumulator for the URLs visited while following redirects
pub(crate) type RedirectLog = Arc<Mutex<Vec<String>>>;

/// Policy that follows every redirect and records the target URL
pub(crate) fn recording_policy(log: &RedirectLog) -> Policy {
    let log = Arc::clone(log);
    Policy::custom(move |attempt| {
        tracing::trace!(url = %attempt.url(), "following redirect");
        if let Ok(mut hops) = log.lock() {
            hops.push(attempt.url().to_string());
        }
        attempt.follow()
    })
}
