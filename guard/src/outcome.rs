//! Outcome taxonomy for guard operations.
//!
//! Every public guard operation returns an [`Outcome`] instead of signaling
//! through errors, so callers cannot accidentally ignore a failure path.
//! `Denied` is an expected, first-class result of policy evaluation, not an
//! exceptional one.

use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Why a policy refused an operation.
#[derive(Debug, Error)]
pub enum DenialReason {
    /// Instance quota reached; carries the count observed at decision time.
    #[error("instance quota reached: {current} live managed instances (cap {cap})")]
    QuotaExceeded { current: usize, cap: usize },

    /// The target exists but does not carry the provenance tag.
    #[error("resource {remote_id} is not managed by this tool (missing provenance tag)")]
    NotManaged { remote_id: String },

    /// The target id did not resolve when a mutation was attempted.
    #[error("resource {remote_id} not found")]
    NotFound { remote_id: String },

    /// A destructive flag was set without the operator's confirmation.
    #[error("public bucket creation requires explicit confirmation")]
    ConfirmationRequired,
}

/// Why an operation failed outside of policy.
#[derive(Debug, Error)]
pub enum FailureCause {
    /// The remote store itself returned an error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The readiness wait expired before the resource left its
    /// provisioning state.
    #[error("timed out after {waited:?} waiting for {id} to become ready")]
    Timeout { id: String, waited: Duration },

    /// Input rejected before any remote call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Discriminated result of one guard invocation. Constructed at the end of
/// the invocation, consumed immediately by the reporting layer.
#[derive(Debug)]
pub enum Outcome {
    /// The operation completed; the resource is managed.
    Success {
        remote_id: String,
        observed_state: String,
    },

    /// A policy refused the operation before any mutation occurred.
    Denied(DenialReason),

    /// The remote store failed, the input was invalid, or a wait expired.
    Failed(FailureCause),

    /// Creation succeeded but attaching the provenance tags failed. The
    /// resource exists remotely and will fail future ownership checks.
    /// Deliberately not rolled back: blind deletion on a secondary failure
    /// risks destroying a resource the operator may still want.
    CreatedUntagged {
        remote_id: String,
        cause: StoreError,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convenience constructor for the common success shape.
    pub fn success(remote_id: impl Into<String>, observed_state: impl Into<String>) -> Self {
        Self::Success {
            remote_id: remote_id.into(),
            observed_state: observed_state.into(),
        }
    }
}
