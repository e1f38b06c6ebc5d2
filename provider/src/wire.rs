//! Request bodies for the provider REST API.
//!
//! Response bodies deserialize straight into the guard's summary types;
//! only the request side needs its own shapes.

use platform_guard::TagSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateInstanceBody<'a> {
    pub size_class: &'a str,
    pub image_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBucketBody<'a> {
    pub name: &'a str,
    pub public: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateZoneBody<'a> {
    pub name: &'a str,
}

/// Envelope for the shared tags endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TagsEnvelope {
    pub tags: TagSet,
}
