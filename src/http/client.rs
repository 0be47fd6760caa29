//! HTTP client construction shared by both tools.

// crates.io
use reqwest::Client;
// self
use crate::_prelude::*;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings shared by both tools.
#[derive(Clone, Debug)]
pub struct ClientOptions {
	/// Whether upstream TLS certificates are verified.
	pub ssl_verify: bool,
	/// Timeout applied to each request.
	pub timeout: Duration,
}
impl ClientOptions {
	/// Options with the given TLS verification setting and the default timeout.
	pub fn new(ssl_verify: bool) -> Self {
		Self { ssl_verify, timeout: DEFAULT_TIMEOUT }
	}

	/// Override the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Build a [`Client`] honouring these options.
	pub fn build(&self) -> Result<Client> {
		if !self.ssl_verify {
			tracing::warn!("TLS certificate verification is disabled");
		}

		let client = Client::builder()
			.danger_accept_invalid_certs(!self.ssl_verify)
			.timeout(self.timeout)
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(client)
	}
}
impl Default for ClientOptions {
	fn default() -> Self {
		Self::new(true)
	}
}
