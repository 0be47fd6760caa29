//! Password-grant request against the provider's token endpoint.

// crates.io
use http::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
// self
use crate::{_prelude::*, token::config::FetcherConfig};

/// Fields of a successful token endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Issued access token, kept verbatim.
	pub access_token: String,
	/// Token type, usually `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default)]
	pub expires_in: Option<u64>,
	/// Refresh token when `offline_access` (or the provider default) grants one.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// Scope actually granted.
	#[serde(default)]
	pub scope: Option<String>,
	/// ID token when the `openid` scope was granted.
	#[serde(default)]
	pub id_token: Option<String>,
}

/// OAuth error body returned alongside a failed token request.
#[derive(Clone, Debug, Deserialize)]
pub struct OAuthError {
	/// Error code such as `invalid_grant`.
	pub error: String,
	/// Optional human-readable description.
	#[serde(default)]
	pub error_description: Option<String>,
}
impl OAuthError {
	/// Summarise an error body for display: OAuth fields when present, else the raw text.
	pub fn describe(body: &str) -> String {
		match serde_json::from_str::<OAuthError>(body) {
			Ok(OAuthError { error, error_description: Some(description) }) =>
				format!("{error}: {description}"),
			Ok(OAuthError { error, error_description: None }) => error,
			Err(_) => body.trim().to_string(),
		}
	}
}

/// Request a token with the resource owner password credentials grant.
pub async fn fetch_token(client: &Client, config: &FetcherConfig) -> Result<TokenResponse> {
	let endpoint = config.token_endpoint()?;
	let form = [
		("grant_type", "password"),
		("client_id", config.client_id.as_str()),
		("client_secret", config.client_secret.as_str()),
		("username", config.username.as_str()),
		("password", config.password.as_str()),
		("scope", config.scope.as_str()),
	];

	tracing::debug!(
		%endpoint,
		client_id = %config.client_id,
		scope = %config.scope,
		"requesting token"
	);

	let start = Instant::now();
	let response = client.post(endpoint.clone()).form(&form).send().await?;
	let status = response.status();

	if status != StatusCode::OK {
		let body = response.text().await.ok().filter(|body| !body.is_empty());

		return Err(Error::HttpStatus { status, url: endpoint, body });
	}

	let body = response.bytes().await?;

	tracing::debug!(%status, elapsed = ?start.elapsed(), "token endpoint responded");

	parse_token_response(&body)
}

/// Parse a 200 token endpoint body, requiring a non-empty `access_token`.
pub fn parse_token_response(body: &[u8]) -> Result<TokenResponse> {
	let value = serde_json::from_slice::<Value>(body)?;
	let has_token =
		value.get("access_token").and_then(Value::as_str).is_some_and(|token| !token.is_empty());

	if !has_token {
		return Err(Error::MissingToken(value.to_string()));
	}

	Ok(serde_json::from_value(value)?)
}
