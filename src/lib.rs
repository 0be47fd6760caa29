//! Operator tooling for RadosGW OIDC authentication: fetch and inspect password-grant tokens,
//! and keep the gateway's IAM OIDC provider in line with declared client IDs and thumbprints.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod cli;
pub mod http;
pub mod iam;
pub mod observability;
pub mod provider;
pub mod security;
pub mod token;

mod error;
mod _prelude {
	pub use std::time::Duration;

	pub use chrono::{DateTime, Utc};
	pub use tokio::time::Instant;

	pub use crate::{Error, Result};
}

pub use crate::error::{Error, Result};
