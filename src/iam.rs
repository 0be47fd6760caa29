//! Minimal IAM client for the gateway's OpenID Connect provider API.

pub mod api;
pub mod client;
pub mod sigv4;
pub mod wire;
