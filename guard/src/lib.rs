//! `platform-guard` — provenance-gated lifecycle guard for cloud resources.
//!
//! Every resource this tool creates is marked with a fixed provenance tag,
//! and every mutation of an existing resource is gated on that tag being
//! present. The guard mediates all lifecycle operations against three
//! resource kinds (compute instances, storage buckets, DNS zones) by
//! composing three policies:
//!
//! - **Quota**: refuse instance creation once the count of live
//!   provenance-tagged instances reaches the configured cap.
//! - **Ownership**: refuse any mutation of a resource whose tag set does not
//!   carry the provenance pair.
//! - **Tagging**: attach the provenance pair plus caller metadata right
//!   after a successful creation so future ownership checks succeed.
//!
//! The guard performs no I/O of its own beyond the [`store::CloudStore`]
//! trait and no interactive I/O at all; confirmation for destructive flags
//! is the caller's job (the guard only sees a pre-confirmed flag).

pub mod config;
pub mod outcome;
pub mod policy;
pub mod store;
pub mod tags;
pub mod types;
pub mod workflow;

pub use config::GuardConfig;
pub use outcome::{DenialReason, FailureCause, Outcome};
pub use policy::{OwnershipDecision, QuotaDecision};
pub use store::{
    BucketSummary, CloudStore, InstanceSummary, RecordSet, StoreError, ZoneSummary,
};
pub use tags::TagSet;
pub use types::{
    BucketSpec, Environment, InstanceSpec, InstanceState, ProvisionRequest, RecordSpec,
    RecordType, ResourceKind, ZoneSpec,
};
pub use workflow::Guard;

/// Default provenance tag key attached to every managed resource.
pub const DEFAULT_PROVENANCE_KEY: &str = "CreatedBy";

/// Default provenance tag value. The key/value pair is the sole
/// authorization signal for later mutations.
pub const DEFAULT_PROVENANCE_VALUE: &str = "platform-cli";

/// Default cap on simultaneously live managed compute instances.
pub const DEFAULT_INSTANCE_CAP: usize = 2;
