//! Transport and trust-anchor checks that warn the operator without blocking a run.
//!
//! The gateway is the authority on what it accepts; these helpers only surface values that are
//! likely to be rejected or to weaken the trust relationship.

// crates.io
use url::Url;

/// Byte length of a SHA-1 certificate thumbprint.
pub const THUMBPRINT_LEN: usize = 20;

/// Whether the URL uses HTTPS.
pub fn is_https(url: &str) -> bool {
	Url::parse(url).map(|url| url.scheme() == "https").unwrap_or(false)
}

/// Whether the value is a hex-encoded SHA-1 fingerprint (40 hex characters).
pub fn thumbprint_is_wellformed(value: &str) -> bool {
	hex::decode(value).map(|bytes| bytes.len() == THUMBPRINT_LEN).unwrap_or(false)
}

/// Log a warning for every thumbprint that does not look like a SHA-1 fingerprint.
///
/// Returns the offending values.
pub fn warn_malformed_thumbprints(thumbprints: &[String]) -> Vec<&str> {
	let malformed = thumbprints
		.iter()
		.map(String::as_str)
		.filter(|value| !thumbprint_is_wellformed(value))
		.collect::<Vec<_>>();

	for value in &malformed {
		tracing::warn!(
			thumbprint = %value,
			"thumbprint is not a 40-character hex SHA-1 fingerprint"
		);
	}

	malformed
}

/// Log a warning when the issuer is not served over HTTPS.
pub fn warn_insecure_issuer(issuer: &str) -> bool {
	let secure = is_https(issuer);

	if !secure {
		tracing::warn!(%issuer, "OIDC issuer does not use HTTPS");
	}

	secure
}
