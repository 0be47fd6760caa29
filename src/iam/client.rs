//! Signed IAM query calls over `reqwest`.

// crates.io
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use url::Url;
// self
use crate::{
	_prelude::*,
	http::client::ClientOptions,
	iam::{
		api::OidcProviderApi,
		sigv4::{self, Credentials, IAM_SERVICE, SigningParams},
		wire::{self, ProviderDetail, QueryForm},
	},
};

/// Region used in the credential scope; the gateway does not route on it.
pub const DEFAULT_REGION: &str = "us-east-1";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Connection settings for the gateway's IAM endpoint.
#[derive(Clone, Debug)]
pub struct IamConfig {
	/// Gateway endpoint IAM calls are posted to.
	pub endpoint: Url,
	/// IAM access key pair.
	pub credentials: Credentials,
	/// Region placed in the signing scope.
	pub region: String,
	/// Transport settings.
	pub transport: ClientOptions,
}
impl IamConfig {
	/// Parse and check the endpoint, using the default region and transport settings.
	pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
		let endpoint = Url::parse(endpoint).map_err(|err| Error::Config {
			field: "s3_server",
			reason: format!("Invalid URL {endpoint:?}: {err}."),
		})?;

		if !matches!(endpoint.scheme(), "http" | "https") || endpoint.host_str().is_none() {
			return Err(Error::Config {
				field: "s3_server",
				reason: format!("Expected an http(s) URL with a host, got {endpoint}."),
			});
		}
		if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
			return Err(Error::Config {
				field: "iam_credentials",
				reason: "Access key and secret must not be empty.".into(),
			});
		}

		Ok(Self {
			endpoint,
			credentials,
			region: DEFAULT_REGION.into(),
			transport: ClientOptions::default(),
		})
	}

	/// Override the signing region.
	pub fn with_region(mut self, region: impl Into<String>) -> Self {
		self.region = region.into();

		self
	}

	/// Override the transport settings.
	pub fn with_transport(mut self, transport: ClientOptions) -> Self {
		self.transport = transport;

		self
	}
}

/// IAM client bound to one gateway endpoint and key pair.
#[derive(Clone, Debug)]
pub struct IamClient {
	http: Client,
	config: IamConfig,
}
impl IamClient {
	/// Build the client and its underlying HTTP connection pool.
	pub fn new(config: IamConfig) -> Result<Self> {
		let http = config.transport.build()?;

		Ok(Self { http, config })
	}

	/// Endpoint requests are sent to.
	pub fn endpoint(&self) -> &Url {
		&self.config.endpoint
	}

	async fn call(&self, form: QueryForm) -> Result<String> {
		let action = form.action();
		let body = form.encode();
		let params = SigningParams {
			credentials: &self.config.credentials,
			region: &self.config.region,
			service: IAM_SERVICE,
			at: Utc::now(),
		};
		let signed =
			sigv4::sign(params, "POST", &self.config.endpoint, FORM_CONTENT_TYPE, body.as_bytes())?;

		tracing::debug!(action, endpoint = %self.config.endpoint, "calling IAM");

		let start = Instant::now();
		let response = self
			.http
			.post(self.config.endpoint.clone())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.header("x-amz-date", signed.amz_date)
			.header("x-amz-content-sha256", signed.content_sha256)
			.header(AUTHORIZATION, signed.authorization)
			.body(body)
			.send()
			.await?;
		let status = response.status();
		let text = response.text().await?;

		tracing::debug!(action, %status, elapsed = ?start.elapsed(), "IAM responded");

		if status.is_success() {
			return Ok(text);
		}

		match wire::parse_error(&text) {
			Some(detail) =>
				Err(Error::Api { operation: action, code: detail.code, message: detail.message }),
			None => Err(Error::HttpStatus {
				status,
				url: self.config.endpoint.clone(),
				body: Some(text).filter(|body| !body.is_empty()),
			}),
		}
	}
}
impl OidcProviderApi for IamClient {
	async fn list_providers(&self) -> Result<Vec<String>> {
		wire::parse_list_providers(&self.call(wire::list_providers()).await?)
	}

	async fn get_provider(&self, arn: &str) -> Result<ProviderDetail> {
		wire::parse_get_provider(&self.call(wire::get_provider(arn)).await?)
	}

	async fn create_provider(
		&self,
		url: &str,
		client_ids: &[String],
		thumbprints: &[String],
	) -> Result<String> {
		wire::parse_create_provider(
			&self.call(wire::create_provider(url, client_ids, thumbprints)).await?,
		)
	}

	async fn delete_provider(&self, arn: &str) -> Result<()> {
		self.call(wire::delete_provider(arn)).await?;

		Ok(())
	}
}
