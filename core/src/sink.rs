//! Side channels: failure notifications and echoed payloads.
//!
//! Both are fire-and-forget. The executor calls them through `guarded`, so a
//! panicking sink never changes what `execute` returns.

use std::error::Error;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::error;

/// Receives every internal failure, whether or not it is also returned.
pub trait Notifier: Send + Sync {
    /// `tag` names the phase and verb, e.g. `"do POST"`.
    fn report(&self, tag: &str, error: &dyn Error);
}

/// Emits failures as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report(&self, tag: &str, err: &dyn Error) {
        error!(tag, error = %err, "request failed");
    }
}

/// Receives successful payloads when the caller asks for them to be shown.
pub trait Echo: Send + Sync {
    fn emit(&self, payload: &[u8]);
}

/// Writes payloads to stdout, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutEcho;

impl Echo for StdoutEcho {
    fn emit(&self, payload: &[u8]) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(payload);
        let _ = out.write_all(b"\n");
        let _ = out.flush();
    }
}

/// Run a side-channel call, swallowing any panic it raises.
pub(crate) fn guarded(f: impl FnOnce()) {
    let _ = catch_unwind(AssertUnwindSafe(f));
}
