//! Per-request context: tenant id plus an operation-scoped trace logger.
//! Passed explicitly into every service call so tenant isolation is visible
//! at each call site.

use std::time::Instant;

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub tenant: String,
}

impl RequestContext {
    pub fn new<S: Into<String>>(tenant: S) -> Self {
        RequestContext {
            tenant: tenant.into(),
        }
    }

    /// Start an operation trace. Emits a start event; call `end()` on the
    /// returned guard for the matching end event with elapsed time.
    pub fn op(&self, label: &'static str) -> OpLog {
        tracing::debug!(tenant = %self.tenant, op = label, "start");
        OpLog {
            label,
            tenant: self.tenant.clone(),
            started: Instant::now(),
        }
    }

    /// One-shot trace marker for operations without a start/end pair.
    pub fn debug(&self, label: &'static str) {
        tracing::debug!(tenant = %self.tenant, op = label, "op");
    }
}

/// Guard for a traced operation. Tracing only, no behavioral effect.
pub struct OpLog {
    label: &'static str,
    tenant: String,
    started: Instant,
}

impl OpLog {
    pub fn end(self) {
        tracing::debug!(
            tenant = %self.tenant,
            op = self.label,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "end"
        );
    }
}
