use std::sync::Arc;

use tracing::Level;

use super::method::SignatureMethod;

/// Receives the received and expected signatures during verification.
///
/// `on_verify` is only called when `enabled` returns true, so callers can
/// keep diagnostics off the hot path.
pub trait VerifyObserver: Send + Sync {
    fn enabled(&self) -> bool;

    fn on_verify(&self, method: SignatureMethod, received: &str, expected: &str);
}

/// Emits a `debug` event per verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl VerifyObserver for TracingObserver {
    fn enabled(&self) -> bool {
        tracing::enabled!(Level::DEBUG)
    }

    fn on_verify(&self, method: SignatureMethod, received: &str, expected: &str) {
        tracing::debug!(%method, received, expected, "verifying signature");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl VerifyObserver for NoopObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn on_verify(&self, _method: SignatureMethod, _received: &str, _expected: &str) {}
}

pub(crate) fn default_observer() -> Arc<dyn VerifyObserver> {
    Arc::new(TracingObserver)
}
