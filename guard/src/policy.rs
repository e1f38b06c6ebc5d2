//! The three sub-policies composed by the guard: quota, ownership, tagging.
//!
//! All three are pure functions over already-fetched state; the workflow
//! layer owns the remote calls that feed them. This keeps every policy
//! decision testable without a store.

use crate::config::GuardConfig;
use crate::store::InstanceSummary;
use crate::tags::TagSet;
use crate::types::{Environment, ResourceKind};

/// Result of the quota check for instance creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed,
    /// Cap reached; carries the count observed at decision time.
    Denied { current: usize },
}

/// Count live managed instances against the cap.
///
/// The count is a point-in-time snapshot, not a transactional reservation:
/// two concurrent invocations can both observe "allowed" and exceed the cap
/// by one. The cap is advisory for a single-operator tool, so this race is
/// accepted rather than closed with locking.
pub fn check_quota(instances: &[InstanceSummary], cfg: &GuardConfig) -> QuotaDecision {
    let current = instances
        .iter()
        .filter(|i| !i.state.is_terminated() && i.tags.is_managed(cfg))
        .count();
    if current >= cfg.instance_cap {
        QuotaDecision::Denied { current }
    } else {
        QuotaDecision::Allowed
    }
}

/// Result of the ownership check for a mutation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    Authorized,
    Unauthorized,
    NotFound,
}

/// Compare a fetched tag set against the provenance pair.
///
/// `None` means the target id did not resolve. A tag set without the
/// provenance key is treated identically to a mismatched value.
pub fn check_ownership(tags: Option<&TagSet>, cfg: &GuardConfig) -> OwnershipDecision {
    match tags {
        None => OwnershipDecision::NotFound,
        Some(tags) if tags.is_managed(cfg) => OwnershipDecision::Authorized,
        Some(_) => OwnershipDecision::Unauthorized,
    }
}

/// Build the deterministic, total tag set applied right after creation:
/// the provenance pair, the three metadata tags, and a human-readable
/// composite name (`{project}-{env}-server` or the bucket/zone equivalent).
pub fn provenance_tags(
    cfg: &GuardConfig,
    owner: &str,
    project: &str,
    environment: Environment,
    kind: ResourceKind,
) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(cfg.provenance_key.clone(), cfg.provenance_value.clone());
    tags.insert("Owner", owner);
    tags.insert("Project", project);
    tags.insert("Environment", environment.as_str());
    tags.insert(
        "Name",
        format!("{project}-{environment}-{}", kind.name_suffix()),
    );
    tags
}
