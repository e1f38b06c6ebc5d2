//! HTTP-backed implementation of the guard's `CloudStore` seam.

use async_trait::async_trait;
use tracing::debug;

use platform_guard::{
    BucketSummary, CloudStore, InstanceSummary, RecordSet, ResourceKind, StoreError, TagSet,
    ZoneSummary,
};

use crate::config::ProviderConfig;
use crate::wire::{CreateBucketBody, CreateInstanceBody, CreateZoneBody, TagsEnvelope};

/// Remote resource store client. One instance per process invocation; no
/// state beyond the connection parameters.
pub struct HttpStore {
    http: reqwest::Client,
    cfg: ProviderConfig,
}

impl HttpStore {
    pub fn new(cfg: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.cfg.base_url)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.cfg.api_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and map transport failures. Policy-relevant statuses
    /// are handled by [`Self::expect_ok`].
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        self.authorized(req)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    /// Map non-success statuses into the guard's error taxonomy. The
    /// provider's own message is passed through verbatim.
    async fn expect_ok(
        resp: reqwest::Response,
        target: Option<&str>,
    ) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        match (status.as_u16(), target) {
            (404, Some(id)) => Err(StoreError::NotFound { id: id.to_string() }),
            (409, _) => Err(StoreError::Conflict(message)),
            _ => Err(StoreError::Provider(message)),
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::Provider(format!("malformed response body: {e}")))
    }
}

#[async_trait]
impl CloudStore for HttpStore {
    async fn create_instance(
        &self,
        size_class: &str,
        image_id: &str,
    ) -> Result<InstanceSummary, StoreError> {
        debug!(size_class, image_id, "POST instances");
        let resp = self
            .send(self.http.post(self.url("instances")).json(&CreateInstanceBody {
                size_class,
                image_id,
            }))
            .await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn list_instances_by_tag(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<InstanceSummary>, StoreError> {
        let resp = self
            .send(
                self.http
                    .get(self.url("instances"))
                    .query(&[("tag_key", key), ("tag_value", value)]),
            )
            .await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn get_instance(&self, id: &str) -> Result<InstanceSummary, StoreError> {
        let resp = self.send(self.http.get(self.url(&format!("instances/{id}")))).await?;
        Self::parse(Self::expect_ok(resp, Some(id)).await?).await
    }

    async fn start_instance(&self, id: &str) -> Result<(), StoreError> {
        let resp = self
            .send(self.http.post(self.url(&format!("instances/{id}/start"))))
            .await?;
        Self::expect_ok(resp, Some(id)).await?;
        Ok(())
    }

    async fn stop_instance(&self, id: &str) -> Result<(), StoreError> {
        let resp = self
            .send(self.http.post(self.url(&format!("instances/{id}/stop"))))
            .await?;
        Self::expect_ok(resp, Some(id)).await?;
        Ok(())
    }

    async fn create_bucket(&self, name: &str, public: bool) -> Result<BucketSummary, StoreError> {
        debug!(name, public, "POST buckets");
        let resp = self
            .send(
                self.http
                    .post(self.url("buckets"))
                    .json(&CreateBucketBody { name, public }),
            )
            .await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StoreError> {
        let resp = self.send(self.http.get(self.url("buckets"))).await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StoreError> {
        let resp = self
            .send(
                self.http
                    .put(self.url(&format!("buckets/{bucket}/objects/{key}")))
                    .body(body),
            )
            .await?;
        Self::expect_ok(resp, Some(bucket)).await?;
        Ok(())
    }

    async fn create_zone(&self, name: &str) -> Result<ZoneSummary, StoreError> {
        debug!(name, "POST zones");
        let resp = self
            .send(self.http.post(self.url("zones")).json(&CreateZoneBody { name }))
            .await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn list_zones(&self) -> Result<Vec<ZoneSummary>, StoreError> {
        let resp = self.send(self.http.get(self.url("zones"))).await?;
        Self::parse(Self::expect_ok(resp, None).await?).await
    }

    async fn upsert_record(&self, zone_id: &str, record: &RecordSet) -> Result<(), StoreError> {
        debug!(zone_id, name = %record.name, "PUT rrsets");
        let resp = self
            .send(
                self.http
                    .put(self.url(&format!("zones/{zone_id}/rrsets")))
                    .json(record),
            )
            .await?;
        Self::expect_ok(resp, Some(zone_id)).await?;
        Ok(())
    }

    async fn get_tags(&self, kind: ResourceKind, id: &str) -> Result<TagSet, StoreError> {
        let resp = self
            .send(
                self.http
                    .get(self.url(&format!("{}/{id}/tags", kind.path_segment()))),
            )
            .await?;
        let envelope: TagsEnvelope = Self::parse(Self::expect_ok(resp, Some(id)).await?).await?;
        Ok(envelope.tags)
    }

    async fn put_tags(
        &self,
        kind: ResourceKind,
        id: &str,
        tags: &TagSet,
    ) -> Result<(), StoreError> {
        let resp = self
            .send(
                self.http
                    .put(self.url(&format!("{}/{id}/tags", kind.path_segment())))
                    .json(&TagsEnvelope { tags: tags.clone() }),
            )
            .await?;
        Self::expect_ok(resp, Some(id)).await?;
        Ok(())
    }
}
