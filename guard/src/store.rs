//! Remote resource store seam.
//!
//! The cloud provider is an opaque remote store reached over the network.
//! The guard depends only on this trait; the `platform-provider` crate
//! supplies the HTTP-backed implementation and tests use an in-memory one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tags::TagSet;
use crate::types::{InstanceState, RecordType, ResourceKind};

/// Failures from the remote store, mapped out of provider-specific shapes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id did not resolve to a resource.
    #[error("resource not found: {id}")]
    NotFound { id: String },

    /// Naming or state conflict, e.g. a bucket name already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The provider returned an error; its message is passed through
    /// verbatim.
    #[error("provider error: {0}")]
    Provider(String),

    /// The remote store could not be reached at all.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A compute instance as observed in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub id: String,
    pub state: InstanceState,
    pub size_class: String,
    #[serde(default)]
    pub tags: TagSet,
}

/// A storage bucket as observed in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub tags: TagSet,
}

/// A DNS zone as observed in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: TagSet,
}

/// One record set. The store replaces any existing set of the same
/// name+type atomically on upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: String,
}

/// The remote store capabilities the guard depends on, one method per
/// operation. Every call is a single blocking round trip; nothing is
/// retried here.
#[async_trait]
pub trait CloudStore: Send + Sync {
    // Instance lifecycle
    async fn create_instance(
        &self,
        size_class: &str,
        image_id: &str,
    ) -> Result<InstanceSummary, StoreError>;
    async fn list_instances_by_tag(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<InstanceSummary>, StoreError>;
    async fn get_instance(&self, id: &str) -> Result<InstanceSummary, StoreError>;
    async fn start_instance(&self, id: &str) -> Result<(), StoreError>;
    async fn stop_instance(&self, id: &str) -> Result<(), StoreError>;

    // Bucket lifecycle
    async fn create_bucket(&self, name: &str, public: bool) -> Result<BucketSummary, StoreError>;
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StoreError>;
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StoreError>;

    // Zone/record lifecycle
    async fn create_zone(&self, name: &str) -> Result<ZoneSummary, StoreError>;
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>, StoreError>;
    async fn upsert_record(&self, zone_id: &str, record: &RecordSet) -> Result<(), StoreError>;

    // Tags (shared across kinds)
    async fn get_tags(&self, kind: ResourceKind, id: &str) -> Result<TagSet, StoreError>;
    async fn put_tags(
        &self,
        kind: ResourceKind,
        id: &str,
        tags: &TagSet,
    ) -> Result<(), StoreError>;
}
