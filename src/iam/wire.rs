//! IAM query-protocol request forms and XML response bodies.

// crates.io
use serde::Deserialize;
use url::form_urlencoded::Serializer;
// self
use crate::_prelude::*;

/// IAM API version every request is pinned to.
pub const API_VERSION: &str = "2010-05-08";

/// Form parameters of one IAM call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryForm {
	action: &'static str,
	params: Vec<(String, String)>,
}
impl QueryForm {
	/// Start a form for the given action.
	pub fn new(action: &'static str) -> Self {
		Self { action, params: Vec::new() }
	}

	/// Action name, e.g. `ListOpenIDConnectProviders`.
	pub fn action(&self) -> &'static str {
		self.action
	}

	/// Append a scalar parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));

		self
	}

	/// Append a list parameter as `<name>.member.<n>` entries, numbered from one.
	pub fn members(mut self, name: &str, values: &[String]) -> Self {
		for (i, value) in values.iter().enumerate() {
			self.params.push((format!("{name}.member.{}", i + 1), value.clone()));
		}

		self
	}

	/// URL-encoded body, `Action` and `Version` first.
	pub fn encode(&self) -> String {
		let mut serializer = Serializer::new(String::new());

		serializer.append_pair("Action", self.action).append_pair("Version", API_VERSION);

		for (name, value) in &self.params {
			serializer.append_pair(name, value);
		}

		serializer.finish()
	}
}

/// `ListOpenIDConnectProviders` request.
pub fn list_providers() -> QueryForm {
	QueryForm::new("ListOpenIDConnectProviders")
}

/// `GetOpenIDConnectProvider` request.
pub fn get_provider(arn: &str) -> QueryForm {
	QueryForm::new("GetOpenIDConnectProvider").param("OpenIDConnectProviderArn", arn)
}

/// `DeleteOpenIDConnectProvider` request.
pub fn delete_provider(arn: &str) -> QueryForm {
	QueryForm::new("DeleteOpenIDConnectProvider").param("OpenIDConnectProviderArn", arn)
}

/// `CreateOpenIDConnectProvider` request.
pub fn create_provider(url: &str, client_ids: &[String], thumbprints: &[String]) -> QueryForm {
	QueryForm::new("CreateOpenIDConnectProvider")
		.param("Url", url)
		.members("ClientIDList", client_ids)
		.members("ThumbprintList", thumbprints)
}

/// `<member>` wrapper the query protocol uses for lists.
#[derive(Clone, Debug, Deserialize)]
pub struct MemberList<T> {
	#[serde(rename = "member", default = "Vec::new")]
	members: Vec<T>,
}
impl<T> MemberList<T> {
	/// Unwrap into the listed values.
	pub fn into_vec(self) -> Vec<T> {
		self.members
	}
}
impl<T> Default for MemberList<T> {
	fn default() -> Self {
		Self { members: Vec::new() }
	}
}

#[derive(Clone, Debug, Deserialize)]
struct ListProvidersResponse {
	#[serde(rename = "ListOpenIDConnectProvidersResult")]
	result: ListProvidersResult,
}

#[derive(Clone, Debug, Deserialize)]
struct ListProvidersResult {
	#[serde(rename = "OpenIDConnectProviderList", default)]
	providers: MemberList<ProviderEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct ProviderEntry {
	#[serde(rename = "Arn")]
	arn: String,
}

#[derive(Clone, Debug, Deserialize)]
struct GetProviderResponse {
	#[serde(rename = "GetOpenIDConnectProviderResult")]
	result: ProviderDetailXml,
}

#[derive(Clone, Debug, Deserialize)]
struct ProviderDetailXml {
	#[serde(rename = "Url", default)]
	url: Option<String>,
	#[serde(rename = "ClientIDList", default)]
	client_ids: MemberList<String>,
	#[serde(rename = "ThumbprintList", default)]
	thumbprints: MemberList<String>,
	#[serde(rename = "CreateDate", default)]
	create_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct CreateProviderResponse {
	#[serde(rename = "CreateOpenIDConnectProviderResult")]
	result: CreateProviderResult,
}

#[derive(Clone, Debug, Deserialize)]
struct CreateProviderResult {
	#[serde(rename = "OpenIDConnectProviderArn")]
	arn: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorResponse {
	#[serde(rename = "Error")]
	error: ErrorDetail,
}

/// Error code and message of a rejected call.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorDetail {
	/// Machine-readable code, e.g. `NoSuchEntity`.
	#[serde(rename = "Code", default)]
	pub code: String,
	/// Human-readable message.
	#[serde(rename = "Message", default)]
	pub message: String,
}

/// Provider attributes as reported by `GetOpenIDConnectProvider`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderDetail {
	/// Issuer URL the provider trusts.
	pub url: Option<String>,
	/// Registered audiences.
	pub client_ids: Vec<String>,
	/// Registered certificate thumbprints.
	pub thumbprints: Vec<String>,
	/// Creation timestamp as sent by the gateway.
	pub create_date: Option<String>,
}

/// Provider ARNs from a `ListOpenIDConnectProviders` body.
pub fn parse_list_providers(xml: &str) -> Result<Vec<String>> {
	let response = quick_xml::de::from_str::<ListProvidersResponse>(xml)?;

	Ok(response.result.providers.into_vec().into_iter().map(|entry| entry.arn).collect())
}

/// Provider attributes from a `GetOpenIDConnectProvider` body.
pub fn parse_get_provider(xml: &str) -> Result<ProviderDetail> {
	let ProviderDetailXml { url, client_ids, thumbprints, create_date } =
		quick_xml::de::from_str::<GetProviderResponse>(xml)?.result;

	Ok(ProviderDetail {
		url,
		client_ids: client_ids.into_vec(),
		thumbprints: thumbprints.into_vec(),
		create_date,
	})
}

/// New provider ARN from a `CreateOpenIDConnectProvider` body.
pub fn parse_create_provider(xml: &str) -> Result<String> {
	Ok(quick_xml::de::from_str::<CreateProviderResponse>(xml)?.result.arn)
}

/// Error detail from an error body.
///
/// Both the IAM `<ErrorResponse><Error>` envelope and a bare S3-style `<Error>` root are accepted.
pub fn parse_error(xml: &str) -> Option<ErrorDetail> {
	let detail = quick_xml::de::from_str::<ErrorResponse>(xml)
		.map(|response| response.error)
		.or_else(|_| quick_xml::de::from_str::<ErrorDetail>(xml))
		.ok()?;

	if detail.code.is_empty() { None } else { Some(detail) }
}
