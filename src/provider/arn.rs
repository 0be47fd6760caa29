//! Provider ARN derivation.

/// Prefix of every IAM OpenID Connect provider ARN on the gateway.
pub const ARN_PREFIX: &str = "arn:aws:iam:::oidc-provider/";

/// Derive the provider ARN the gateway assigns to an issuer URL.
///
/// The scheme is stripped and the remainder embedded verbatim, so the result depends on nothing
/// but the issuer string.
pub fn provider_arn(issuer: &str) -> String {
	format!("{ARN_PREFIX}{}", issuer_path(issuer))
}

/// Issuer URL without its `https://` or `http://` prefix.
pub fn issuer_path(issuer: &str) -> &str {
	issuer
		.strip_prefix("https://")
		.or_else(|| issuer.strip_prefix("http://"))
		.unwrap_or(issuer)
}
