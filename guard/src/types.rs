//! Core domain types: resource kinds, lifecycle states, provision requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three resource kinds under this tool's governance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    ComputeInstance,
    StorageBucket,
    DnsZone,
}

impl ResourceKind {
    /// URL path segment used by the remote store for this kind.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::ComputeInstance => "instances",
            Self::StorageBucket => "buckets",
            Self::DnsZone => "zones",
        }
    }

    /// Suffix of the human-readable composite `Name` tag.
    pub fn name_suffix(self) -> &'static str {
        match self {
            Self::ComputeInstance => "server",
            Self::StorageBucket => "bucket",
            Self::DnsZone => "zone",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ComputeInstance => "compute-instance",
            Self::StorageBucket => "storage-bucket",
            Self::DnsZone => "dns-zone",
        };
        f.write_str(s)
    }
}

/// Deployment environment; a closed set, enforced at the argument boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            "prod" => Ok(Self::Prod),
            other => Err(format!(
                "invalid environment {other:?} (expected dev, test or prod)"
            )),
        }
    }
}

/// Compute instance lifecycle state as reported by the remote store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    #[default]
    Pending,
    Running,
    Stopping,
    Stopped,
    Terminated,
}

impl InstanceState {
    /// Terminal state: terminated instances do not count against quota and
    /// are hidden from listings.
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNS record types supported by the record upsert path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    TXT,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CNAME => "CNAME",
            Self::TXT => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::AAAA),
            "CNAME" => Ok(Self::CNAME),
            "TXT" => Ok(Self::TXT),
            other => Err(format!(
                "unsupported record type {other:?} (expected A, AAAA, CNAME or TXT)"
            )),
        }
    }
}

/// Kind-specific parameters for a compute instance creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSpec {
    /// Provider size class, e.g. `t2.micro`.
    pub size_class: String,
    /// Provider machine image id.
    pub image_id: String,
}

/// Kind-specific parameters for a storage bucket creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub name: String,
    /// Whether the bucket is publicly visible.
    pub public: bool,
    /// Set by the caller after the operator explicitly confirmed public
    /// visibility. The guard never prompts; it only checks this flag.
    pub confirmed: bool,
}

/// Kind-specific parameters for a DNS zone creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSpec {
    pub name: String,
}

/// Parameters for a DNS record upsert. Records carry no tags of their own;
/// authorization is delegated to the parent zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    pub zone_id: String,
    pub name: String,
    pub record_type: RecordType,
    pub value: String,
}

/// Validated input to a creation operation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub owner: String,
    pub project: String,
    pub environment: Environment,
}

impl ProvisionRequest {
    /// Validate common creation metadata. Tag values feed the composite
    /// `Name` tag, so they must be non-empty and free of whitespace.
    pub fn validate(&self) -> Result<(), String> {
        validate_label("owner", &self.owner)?;
        validate_label("project", &self.project)?;
        Ok(())
    }
}

fn validate_label(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("{field} must not contain whitespace"));
    }
    Ok(())
}

/// Bucket naming rules: 3-63 chars, lowercase alphanumerics and hyphens,
/// no leading or trailing hyphen.
pub fn validate_bucket_name(name: &str) -> Result<(), String> {
    if name.len() < 3 || name.len() > 63 {
        return Err(format!(
            "bucket name must be 3-63 characters, got {}",
            name.len()
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("bucket name may only contain lowercase letters, digits and hyphens".into());
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err("bucket name must not start or end with a hyphen".into());
    }
    Ok(())
}

/// Zone names must be dotted DNS names.
pub fn validate_zone_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("zone name must not be empty".into());
    }
    if !name.contains('.') {
        return Err(format!("zone name {name:?} is not a DNS name"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err("zone name must not contain whitespace".into());
    }
    Ok(())
}

/// Record-level validation. A and AAAA values must parse as addresses of
/// the matching family; other types only need a non-empty value.
pub fn validate_record(spec: &RecordSpec) -> Result<(), String> {
    if spec.name.is_empty() {
        return Err("record name must not be empty".into());
    }
    if spec.value.is_empty() {
        return Err("record value must not be empty".into());
    }
    match spec.record_type {
        RecordType::A => {
            spec.value
                .parse::<std::net::Ipv4Addr>()
                .map_err(|_| format!("{:?} is not a valid IPv4 address", spec.value))?;
        }
        RecordType::AAAA => {
            spec.value
                .parse::<std::net::Ipv6Addr>()
                .map_err(|_| format!("{:?} is not a valid IPv6 address", spec.value))?;
        }
        RecordType::CNAME | RecordType::TXT => {}
    }
    Ok(())
}
