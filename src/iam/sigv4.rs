//! AWS Signature Version 4 request signing for IAM query calls.

// std
use std::fmt::{Debug, Formatter, Result as FmtResult};
// crates.io
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;
// self
use crate::_prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
/// Service name IAM requests are scoped to.
pub const IAM_SERVICE: &str = "iam";

/// Static access key pair used to sign requests.
#[derive(Clone)]
pub struct Credentials {
	/// Access key identifier.
	pub access_key_id: String,
	/// Secret access key.
	pub secret_access_key: String,
}
impl Credentials {
	/// Create a key pair.
	pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
		Self { access_key_id: access_key_id.into(), secret_access_key: secret_access_key.into() }
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_key_id", &self.access_key_id)
			.field("secret_access_key", &"<redacted>")
			.finish()
	}
}

/// Headers to attach to a signed request.
#[derive(Clone, Debug)]
pub struct SignedHeaders {
	/// `X-Amz-Date` value.
	pub amz_date: String,
	/// `X-Amz-Content-Sha256` value.
	pub content_sha256: String,
	/// `Authorization` value.
	pub authorization: String,
}

/// Key material and scope shared by every request of a session.
#[derive(Clone, Copy, Debug)]
pub struct SigningParams<'a> {
	/// Key pair to sign with.
	pub credentials: &'a Credentials,
	/// Region component of the credential scope.
	pub region: &'a str,
	/// Service component of the credential scope.
	pub service: &'a str,
	/// Signing time.
	pub at: DateTime<Utc>,
}

/// Sign a request, covering its content type, host, body hash and date.
pub fn sign(
	params: SigningParams<'_>,
	method: &str,
	url: &Url,
	content_type: &str,
	body: &[u8],
) -> Result<SignedHeaders> {
	let SigningParams { credentials, region, service, at } = params;
	let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
	let date = at.format("%Y%m%d").to_string();
	let host = host_header(url)?;
	let content_sha256 = hex::encode(Sha256::digest(body));
	let headers = [
		("content-type", content_type),
		("host", host.as_str()),
		("x-amz-content-sha256", content_sha256.as_str()),
		("x-amz-date", amz_date.as_str()),
	];
	let (canonical, signed_headers) = canonical_request(
		method,
		canonical_uri(url),
		&canonical_query(url),
		&headers,
		&content_sha256,
	);
	let scope = format!("{date}/{region}/{service}/aws4_request");
	let to_sign = string_to_sign(&amz_date, &scope, &canonical);
	let key = signing_key(&credentials.secret_access_key, &date, region, service)?;
	let signature = hex::encode(hmac_sha256(&key, to_sign.as_bytes())?);
	let authorization = format!(
		"{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
		credentials.access_key_id
	);

	tracing::debug!(%scope, %signed_headers, "request signed");

	Ok(SignedHeaders { amz_date, content_sha256, authorization })
}

/// Build the canonical request and the `SignedHeaders` list.
///
/// Header names are lowercased and sorted; values are trimmed.
pub fn canonical_request(
	method: &str,
	uri: &str,
	query: &str,
	headers: &[(&str, &str)],
	payload_hash: &str,
) -> (String, String) {
	let mut headers = headers
		.iter()
		.map(|(name, value)| (name.to_ascii_lowercase(), value.trim()))
		.collect::<Vec<_>>();

	headers.sort_by(|a, b| a.0.cmp(&b.0));

	let canonical_headers =
		headers.iter().map(|(name, value)| format!("{name}:{value}\n")).collect::<String>();
	let signed_headers =
		headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>().join(";");
	let canonical = format!(
		"{method}\n{uri}\n{query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
	);

	(canonical, signed_headers)
}

/// Build the string to sign for a canonical request.
pub fn string_to_sign(amz_date: &str, scope: &str, canonical_request: &str) -> String {
	format!(
		"{ALGORITHM}\n{amz_date}\n{scope}\n{}",
		hex::encode(Sha256::digest(canonical_request.as_bytes()))
	)
}

/// Derive the per-day signing key.
pub fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
	let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
	let k_region = hmac_sha256(&k_date, region.as_bytes())?;
	let k_service = hmac_sha256(&k_region, service.as_bytes())?;

	hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
	let mut mac = HmacSha256::new_from_slice(key).map_err(|err| Error::Config {
		field: "secret_access_key",
		reason: format!("Unusable signing key: {err}."),
	})?;

	mac.update(data);

	Ok(mac.finalize().into_bytes().to_vec())
}

fn host_header(url: &Url) -> Result<String> {
	let host = url.host_str().ok_or_else(|| Error::Config {
		field: "endpoint",
		reason: format!("URL {url} has no host."),
	})?;

	Ok(match url.port() {
		Some(port) => format!("{host}:{port}"),
		None => host.to_string(),
	})
}

fn canonical_uri(url: &Url) -> &str {
	match url.path() {
		"" => "/",
		path => path,
	}
}

fn canonical_query(url: &Url) -> String {
	let mut pairs = url
		.query_pairs()
		.map(|(name, value)| (uri_encode(&name), uri_encode(&value)))
		.collect::<Vec<_>>();

	pairs.sort();

	pairs.into_iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
}

/// Percent-encode everything except RFC 3986 unreserved characters.
fn uri_encode(value: &str) -> String {
	let mut encoded = String::with_capacity(value.len());

	for byte in value.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' =>
				encoded.push(byte as char),
			_ => encoded.push_str(&format!("%{byte:02X}")),
		}
	}

	encoded
}
