//! Per-kind lifecycle workflows.
//!
//! Control flow for every operation: validate inputs → (mutation) load
//! remote state and apply the ownership policy → (creation) apply the quota
//! policy → perform the remote side effect → (creation) apply the tagging
//! policy → report the outcome. The first failing step aborts the rest;
//! nothing is retried.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::GuardConfig;
use crate::outcome::{DenialReason, FailureCause, Outcome};
use crate::policy::{self, OwnershipDecision, QuotaDecision};
use crate::store::{
    BucketSummary, CloudStore, InstanceSummary, RecordSet, StoreError, ZoneSummary,
};
use crate::types::{
    self, BucketSpec, InstanceSpec, InstanceState, ProvisionRequest, RecordSpec, ResourceKind,
    ZoneSpec,
};

/// The Provenance Guard: mediates every lifecycle operation against the
/// remote store. Holds no state of its own; the remote store is the single
/// source of truth and every check re-fetches it.
pub struct Guard<'a, S: CloudStore> {
    store: &'a S,
    cfg: &'a GuardConfig,
}

impl<'a, S: CloudStore> Guard<'a, S> {
    pub fn new(store: &'a S, cfg: &'a GuardConfig) -> Self {
        Self { store, cfg }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Creation workflows
    // ─────────────────────────────────────────────────────────────────────

    /// Create a compute instance: quota check, remote create, bounded wait
    /// for the running state, then provenance tagging.
    pub async fn create_instance(&self, req: &ProvisionRequest, spec: &InstanceSpec) -> Outcome {
        if let Err(msg) = req.validate() {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }

        let listing = match self
            .store
            .list_instances_by_tag(&self.cfg.provenance_key, &self.cfg.provenance_value)
            .await
        {
            Ok(listing) => listing,
            Err(err) => return Outcome::Failed(err.into()),
        };
        if let QuotaDecision::Denied { current } = policy::check_quota(&listing, self.cfg) {
            info!(current, cap = self.cfg.instance_cap, "instance quota reached");
            return Outcome::Denied(DenialReason::QuotaExceeded {
                current,
                cap: self.cfg.instance_cap,
            });
        }

        let created = match self
            .store
            .create_instance(&spec.size_class, &spec.image_id)
            .await
        {
            Ok(created) => created,
            Err(err) => return Outcome::Failed(err.into()),
        };
        info!(id = %created.id, "instance created, waiting for running state");

        let observed = match self.wait_until_running(&created.id).await {
            Ok(observed) => observed,
            Err(cause) => return Outcome::Failed(cause),
        };

        self.finish_creation(
            ResourceKind::ComputeInstance,
            &created.id,
            observed.state.as_str(),
            req,
        )
        .await
    }

    /// Create a storage bucket. Public visibility is destructive enough to
    /// require prior confirmation; the caller prompts, the guard only
    /// checks the flag.
    pub async fn create_bucket(&self, req: &ProvisionRequest, spec: &BucketSpec) -> Outcome {
        if let Err(msg) = req.validate() {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }
        if let Err(msg) = types::validate_bucket_name(&spec.name) {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }
        if spec.public && !spec.confirmed {
            return Outcome::Denied(DenialReason::ConfirmationRequired);
        }

        let created = match self.store.create_bucket(&spec.name, spec.public).await {
            Ok(created) => created,
            Err(err) => return Outcome::Failed(err.into()),
        };

        self.finish_creation(ResourceKind::StorageBucket, &created.name, "available", req)
            .await
    }

    /// Create a DNS zone.
    pub async fn create_zone(&self, req: &ProvisionRequest, spec: &ZoneSpec) -> Outcome {
        if let Err(msg) = req.validate() {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }
        if let Err(msg) = types::validate_zone_name(&spec.name) {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }

        let created = match self.store.create_zone(&spec.name).await {
            Ok(created) => created,
            Err(err) => return Outcome::Failed(err.into()),
        };

        self.finish_creation(ResourceKind::DnsZone, &created.id, "active", req)
            .await
    }

    /// Shared tail of every creation: attach the provenance tag set. A tag
    /// failure after the resource already exists remotely is surfaced as a
    /// distinct warning outcome, never rolled back.
    async fn finish_creation(
        &self,
        kind: ResourceKind,
        remote_id: &str,
        observed_state: &str,
        req: &ProvisionRequest,
    ) -> Outcome {
        let tags = policy::provenance_tags(
            self.cfg,
            &req.owner,
            &req.project,
            req.environment,
            kind,
        );
        match self.store.put_tags(kind, remote_id, &tags).await {
            Ok(()) => {
                info!(%kind, remote_id, "resource created and tagged");
                Outcome::success(remote_id, observed_state)
            }
            Err(cause) => {
                warn!(%kind, remote_id, %cause, "resource created but tagging failed; it is now unmanaged");
                Outcome::CreatedUntagged {
                    remote_id: remote_id.to_string(),
                    cause,
                }
            }
        }
    }

    /// Poll the store until the instance reports `running`, bounded by the
    /// configured timeout. The original tool waited forever here; a stuck
    /// provisioning call now surfaces as a timeout failure instead.
    async fn wait_until_running(&self, id: &str) -> Result<InstanceSummary, FailureCause> {
        let started = tokio::time::Instant::now();
        loop {
            let observed = self.store.get_instance(id).await.map_err(FailureCause::from)?;
            match observed.state {
                InstanceState::Running => return Ok(observed),
                InstanceState::Terminated => {
                    return Err(FailureCause::Store(StoreError::Provider(format!(
                        "instance {id} terminated while waiting for it to start"
                    ))));
                }
                state => debug!(id, %state, "instance not ready yet"),
            }
            if started.elapsed() >= self.cfg.ready_timeout {
                return Err(FailureCause::Timeout {
                    id: id.to_string(),
                    waited: duration_floor(started.elapsed()),
                });
            }
            tokio::time::sleep(self.cfg.ready_poll_interval).await;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations (ownership-gated)
    // ─────────────────────────────────────────────────────────────────────

    /// Start a managed instance.
    pub async fn start_instance(&self, id: &str) -> Outcome {
        match self.ownership(ResourceKind::ComputeInstance, id).await {
            Ok(None) => {}
            Ok(Some(denied)) => return denied,
            Err(err) => return Outcome::Failed(err.into()),
        }
        match self.store.start_instance(id).await {
            Ok(()) => Outcome::success(id, "starting"),
            Err(err) => Outcome::Failed(err.into()),
        }
    }

    /// Stop a managed instance.
    pub async fn stop_instance(&self, id: &str) -> Outcome {
        match self.ownership(ResourceKind::ComputeInstance, id).await {
            Ok(None) => {}
            Ok(Some(denied)) => return denied,
            Err(err) => return Outcome::Failed(err.into()),
        }
        match self.store.stop_instance(id).await {
            Ok(()) => Outcome::success(id, "stopping"),
            Err(err) => Outcome::Failed(err.into()),
        }
    }

    /// Upload an object into a managed bucket.
    pub async fn upload_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Outcome {
        if key.is_empty() {
            return Outcome::Failed(FailureCause::InvalidInput(
                "object key must not be empty".into(),
            ));
        }
        match self.ownership(ResourceKind::StorageBucket, bucket).await {
            Ok(None) => {}
            Ok(Some(denied)) => return denied,
            Err(err) => return Outcome::Failed(err.into()),
        }
        match self.store.upload_object(bucket, key, body).await {
            Ok(()) => Outcome::success(bucket, format!("object {key} uploaded")),
            Err(err) => Outcome::Failed(err.into()),
        }
    }

    /// Upsert a DNS record. Records carry no tags of their own, so the
    /// ownership check runs against the parent zone. The store replaces any
    /// existing record of the same name+type atomically; same inputs produce
    /// the same end state.
    pub async fn upsert_record(&self, spec: &RecordSpec) -> Outcome {
        if let Err(msg) = types::validate_record(spec) {
            return Outcome::Failed(FailureCause::InvalidInput(msg));
        }
        match self.ownership(ResourceKind::DnsZone, &spec.zone_id).await {
            Ok(None) => {}
            Ok(Some(denied)) => return denied,
            Err(err) => return Outcome::Failed(err.into()),
        }
        let record = RecordSet {
            name: spec.name.clone(),
            record_type: spec.record_type,
            value: spec.value.clone(),
        };
        match self.store.upsert_record(&spec.zone_id, &record).await {
            Ok(()) => Outcome::success(
                &spec.zone_id,
                format!("record {} {} upserted", spec.name, spec.record_type),
            ),
            Err(err) => Outcome::Failed(err.into()),
        }
    }

    /// Fetch the target's tags and apply the ownership policy. Returns
    /// `Ok(None)` when the mutation may proceed, `Ok(Some(denied))` with the
    /// ready-made denial otherwise. The mutating call MUST NOT be issued on
    /// a denial.
    async fn ownership(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<Outcome>, StoreError> {
        let tags = match self.store.get_tags(kind, id).await {
            Ok(tags) => Some(tags),
            Err(StoreError::NotFound { .. }) => None,
            Err(err) => return Err(err),
        };
        let denial = match policy::check_ownership(tags.as_ref(), self.cfg) {
            OwnershipDecision::Authorized => None,
            OwnershipDecision::Unauthorized => {
                info!(%kind, id, "mutation denied: resource is not managed");
                Some(Outcome::Denied(DenialReason::NotManaged {
                    remote_id: id.to_string(),
                }))
            }
            OwnershipDecision::NotFound => {
                info!(%kind, id, "mutation denied: resource not found");
                Some(Outcome::Denied(DenialReason::NotFound {
                    remote_id: id.to_string(),
                }))
            }
        };
        Ok(denial)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Listings
    // ─────────────────────────────────────────────────────────────────────

    /// Managed, non-terminated instances.
    pub async fn list_instances(&self) -> Result<Vec<InstanceSummary>, StoreError> {
        let listing = self
            .store
            .list_instances_by_tag(&self.cfg.provenance_key, &self.cfg.provenance_value)
            .await?;
        Ok(listing
            .into_iter()
            .filter(|i| !i.state.is_terminated() && i.tags.is_managed(self.cfg))
            .collect())
    }

    /// Managed buckets, filtered client-side from the full listing.
    pub async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StoreError> {
        let listing = self.store.list_buckets().await?;
        Ok(listing
            .into_iter()
            .filter(|b| b.tags.is_managed(self.cfg))
            .collect())
    }

    /// Managed zones, filtered client-side from the full listing.
    pub async fn list_zones(&self) -> Result<Vec<ZoneSummary>, StoreError> {
        let listing = self.store.list_zones().await?;
        Ok(listing
            .into_iter()
            .filter(|z| z.tags.is_managed(self.cfg))
            .collect())
    }
}

/// Round sub-second noise off a reported wait duration.
fn duration_floor(d: Duration) -> Duration {
    Duration::from_secs(d.as_secs())
}
