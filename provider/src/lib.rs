//! `platform-provider` — HTTP client for the remote resource store.
//!
//! Implements the guard's [`platform_guard::CloudStore`] seam against the
//! provider's REST API. Provider-specific failures are mapped into the
//! guard's `StoreError` taxonomy here so that nothing above this crate ever
//! sees a provider error shape.

pub mod client;
pub mod config;
mod wire;

pub use client::HttpStore;
pub use config::ProviderConfig;
