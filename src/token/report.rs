//! Console rendering of a fetched token.
//!
//! The raw token is the only thing written to `out`, so it can be captured by a shell; everything
//! else goes to `diag`.

// std
use std::io::Write;
// self
use crate::{
	_prelude::*,
	token::{
		claims::{self, Claims},
		client::{OAuthError, TokenResponse},
		config::FetcherConfig,
	},
};

/// Claims rendered as timestamps next to their raw value.
const DATE_CLAIMS: [&str; 4] = ["exp", "iat", "nbf", "auth_time"];

/// Print the request summary shown before the token endpoint is contacted.
pub fn write_request_summary(diag: &mut impl Write, config: &FetcherConfig) -> Result<()> {
	writeln!(diag, "🚀 Getting OIDC token using Resource Owner Password Credentials Grant")?;
	writeln!(diag)?;
	writeln!(diag, "🔗 Token endpoint: {}", config.token_endpoint()?)?;
	writeln!(diag, "👤 Username: {}", config.username)?;
	writeln!(diag, "🔑 Client ID: {}", config.client_id)?;
	writeln!(diag, "📋 Scope: {}", config.scope)?;
	writeln!(diag)?;

	Ok(())
}

/// Print the raw token to `out` and its decoded form plus usage hints to `diag`.
pub fn write_token(
	out: &mut impl Write,
	diag: &mut impl Write,
	response: &TokenResponse,
) -> Result<()> {
	let token = response.access_token.as_str();

	writeln!(diag, "Token obtained successfully!")?;
	writeln!(diag)?;

	writeln!(out, "RAW ACCESS TOKEN:")?;
	writeln!(out, "{token}")?;
	writeln!(out)?;
	out.flush()?;

	write_response_fields(diag, response)?;

	match claims::decode_header(token) {
		Ok(header) => {
			writeln!(diag, "TOKEN HEADER:")?;
			writeln!(diag, "  alg: {:?}", header.alg)?;

			if let Some(typ) = &header.typ {
				writeln!(diag, "  typ: {typ}")?;
			}
			if let Some(kid) = &header.kid {
				writeln!(diag, "  kid: {kid}")?;
			}

			writeln!(diag)?;
		},
		Err(e) => tracing::debug!(error = %e, "token header is not decodable"),
	}

	writeln!(diag, "DECODED TOKEN INFO:")?;

	match claims::decode_claims(token) {
		Ok(decoded) => {
			writeln!(diag, "{}", serde_json::to_string_pretty(&decoded)?)?;
			write_dates(diag, &decoded)?;
		},
		Err(e) => {
			tracing::debug!(error = %e, "token payload is not decodable");
			writeln!(diag, "Failed to decode token")?;
		},
	}

	writeln!(diag)?;
	writeln!(diag, "Usage with radosgw-assume:")?;

	for line in claims::usage_instructions(token) {
		writeln!(diag, "   {line}")?;
	}

	Ok(())
}

/// Print why a token request failed, including the provider's OAuth error when it sent one.
pub fn write_failure(diag: &mut impl Write, error: &Error) -> Result<()> {
	match error {
		Error::HttpStatus { status, body, .. } => {
			writeln!(diag, "❌ Token request failed with status {}", status.as_u16())?;

			if let Some(body) = body {
				writeln!(diag, "Error: {}", OAuthError::describe(body))?;
			}
		},
		Error::MissingToken(body) => {
			writeln!(diag, "❌ No access token in response")?;
			writeln!(diag, "Response: {body}")?;
		},
		Error::Config { reason, .. } => writeln!(diag, "❌ {reason}")?,
		other => writeln!(diag, "❌ Request failed: {other}")?,
	}

	Ok(())
}

fn write_response_fields(diag: &mut impl Write, response: &TokenResponse) -> Result<()> {
	let mut any = false;

	if let Some(token_type) = &response.token_type {
		writeln!(diag, "Token type: {token_type}")?;
		any = true;
	}
	if let Some(expires_in) = response.expires_in {
		writeln!(diag, "Expires in: {expires_in}s")?;
		any = true;
	}
	if let Some(scope) = &response.scope {
		writeln!(diag, "Granted scope: {scope}")?;
		any = true;
	}
	if response.refresh_token.is_some() {
		writeln!(diag, "Refresh token: issued")?;
		any = true;
	}
	if response.id_token.is_some() {
		writeln!(diag, "ID token: issued")?;
		any = true;
	}
	if any {
		writeln!(diag)?;
	}

	Ok(())
}

fn write_dates(diag: &mut impl Write, decoded: &Claims) -> Result<()> {
	for name in DATE_CLAIMS {
		if let Some(at) = claims::numeric_date(decoded, name) {
			writeln!(diag, "  {name}: {}", at.to_rfc3339())?;
		}
	}

	Ok(())
}
