//! Compiled-in token fetcher configuration and its validation.

// std
use std::fmt::{Debug, Formatter, Result as FmtResult};
// crates.io
use url::Url;
// self
use crate::_prelude::*;

/// Relative path of the token endpoint under the provider (realm) URL.
pub const TOKEN_ENDPOINT_PATH: &str = "protocol/openid-connect/token";

/// Default provider (realm) URL.
pub const DEFAULT_PROVIDER_URL: &str = "https://keycloak.example.com/realms/myrealm";
/// Default confidential client identifier.
pub const DEFAULT_CLIENT_ID: &str = "radosgw-public";
/// Default scope; add `offline_access` to also receive a refresh token.
pub const DEFAULT_SCOPE: &str = "openid";

/// Placeholder client secret that must be replaced before use.
pub const PLACEHOLDER_CLIENT_SECRET: &str = "your-client-secret-here";
/// Placeholder username that must be replaced before use.
pub const PLACEHOLDER_USERNAME: &str = "your-username";
/// Placeholder password that must be replaced before use.
pub const PLACEHOLDER_PASSWORD: &str = "your-password";

/// Settings for a single password-grant token request.
#[derive(Clone)]
pub struct FetcherConfig {
	/// Provider base URL; the token endpoint path is joined onto it.
	pub provider_url: String,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: String,
	/// Resource owner username.
	pub username: String,
	/// Resource owner password.
	pub password: String,
	/// Requested scope.
	pub scope: String,
	/// Whether the provider's TLS certificate is verified.
	pub ssl_verify: bool,
}
impl FetcherConfig {
	/// Reject unusable settings, most importantly credentials left at their placeholders.
	pub fn validate(&self) -> Result<()> {
		if self.client_secret == PLACEHOLDER_CLIENT_SECRET {
			return Err(Error::Config {
				field: "client_secret",
				reason: "Please configure CLIENT_SECRET.".into(),
			});
		}
		if self.username == PLACEHOLDER_USERNAME {
			return Err(Error::Config {
				field: "username",
				reason: "Please configure USERNAME.".into(),
			});
		}
		if self.password == PLACEHOLDER_PASSWORD {
			return Err(Error::Config {
				field: "password",
				reason: "Please configure PASSWORD.".into(),
			});
		}
		if self.client_id.trim().is_empty() {
			return Err(Error::Config { field: "client_id", reason: "Must not be empty.".into() });
		}

		self.token_endpoint()?;

		Ok(())
	}

	/// Token endpoint derived from the provider URL.
	///
	/// A trailing slash is forced onto the base so the relative path is appended rather than
	/// replacing the last path segment.
	pub fn token_endpoint(&self) -> Result<Url> {
		let base = format!("{}/", self.provider_url.trim_end_matches('/'));
		let base = Url::parse(&base).map_err(|err| Error::Config {
			field: "provider_url",
			reason: format!("Invalid URL {:?}: {err}.", self.provider_url),
		})?;

		Ok(base.join(TOKEN_ENDPOINT_PATH)?)
	}
}
impl Default for FetcherConfig {
	fn default() -> Self {
		Self {
			provider_url: DEFAULT_PROVIDER_URL.into(),
			client_id: DEFAULT_CLIENT_ID.into(),
			client_secret: PLACEHOLDER_CLIENT_SECRET.into(),
			username: PLACEHOLDER_USERNAME.into(),
			password: PLACEHOLDER_PASSWORD.into(),
			scope: DEFAULT_SCOPE.into(),
			ssl_verify: false,
		}
	}
}
impl Debug for FetcherConfig {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("FetcherConfig")
			.field("provider_url", &self.provider_url)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("scope", &self.scope)
			.field("ssl_verify", &self.ssl_verify)
			.finish()
	}
}
