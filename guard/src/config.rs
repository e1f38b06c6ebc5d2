//! Guard configuration.
//!
//! The provenance marker and the instance cap are process-wide constants in
//! practice, but they live in an explicit struct constructed once at startup
//! and passed by reference into the guard, so tests can substitute different
//! caps and markers without process-level side effects.

use std::time::Duration;

use crate::{DEFAULT_INSTANCE_CAP, DEFAULT_PROVENANCE_KEY, DEFAULT_PROVENANCE_VALUE};

/// Fixed policy parameters for one process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Tag key marking a resource as managed by this tool.
    pub provenance_key: String,
    /// Expected value under `provenance_key`; compared by exact string match.
    pub provenance_value: String,
    /// Maximum count of live (non-terminated) managed compute instances.
    pub instance_cap: usize,
    /// Interval between readiness polls while waiting for an instance to
    /// leave its provisioning state.
    pub ready_poll_interval: Duration,
    /// Upper bound on the readiness wait. Expiry yields a timeout failure
    /// instead of blocking indefinitely.
    pub ready_timeout: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            provenance_key: DEFAULT_PROVENANCE_KEY.to_string(),
            provenance_value: DEFAULT_PROVENANCE_VALUE.to_string(),
            instance_cap: DEFAULT_INSTANCE_CAP,
            ready_poll_interval: Duration::from_secs(2),
            ready_timeout: Duration::from_secs(120),
        }
    }
}
