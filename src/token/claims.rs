//! Unverified token inspection for display purposes.
//!
//! Nothing in this module checks signatures or claim validity; the decoded values are only shown
//! to the operator.

// crates.io
use base64::prelude::*;
use jsonwebtoken::Header;
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Claim map decoded from the token payload.
pub type Claims = Map<String, Value>;

/// Decode the payload segment of a compact token into its claim map.
///
/// The token must split into exactly three `.`-separated segments. Missing base64 padding is
/// restored on the payload before decoding.
pub fn decode_claims(token: &str) -> Result<Claims> {
	let segments = token.split('.').collect::<Vec<_>>();

	if segments.len() != 3 {
		return Err(Error::Decode(format!(
			"expected 3 segments separated by '.', found {}",
			segments.len()
		)));
	}

	let payload = restore_padding(segments[1]);
	let bytes = BASE64_URL_SAFE
		.decode(payload.as_bytes())
		.map_err(|err| Error::Decode(format!("payload is not base64url: {err}")))?;
	let value = serde_json::from_slice::<Value>(&bytes)
		.map_err(|err| Error::Decode(format!("payload is not JSON: {err}")))?;

	match value {
		Value::Object(claims) => Ok(claims),
		other => Err(Error::Decode(format!("payload is not a JSON object: {other}"))),
	}
}

/// Decode the JOSE header of a compact token.
pub fn decode_header(token: &str) -> Result<Header> {
	Ok(jsonwebtoken::decode_header(token)?)
}

/// Pad a base64 segment with `=` up to the next multiple of four.
pub fn restore_padding(segment: &str) -> String {
	let missing = (4 - segment.len() % 4) % 4;
	let mut padded = String::with_capacity(segment.len() + missing);

	padded.push_str(segment);
	padded.extend(std::iter::repeat_n('=', missing));

	padded
}

/// Render a numeric-date claim (`exp`, `iat`, `nbf`, `auth_time`) as an RFC 3339 UTC timestamp.
pub fn numeric_date(claims: &Claims, name: &str) -> Option<DateTime<Utc>> {
	let seconds = claims.get(name)?.as_i64()?;

	DateTime::<Utc>::from_timestamp(seconds, 0)
}

/// Shell lines that hand the token to `radosgw-assume`.
pub fn usage_instructions(token: &str) -> [String; 2] {
	[
		format!("export RADOSGW_OIDC_TOKEN='{token}'"),
		"export RADOSGW_OIDC_AUTH_TYPE='token'".to_string(),
	]
}
