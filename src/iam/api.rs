//! Provider operations the reconciler depends on.

// self
use crate::{_prelude::*, iam::wire::ProviderDetail};

/// CRUD surface of the IAM OpenID Connect provider API.
///
/// The gateway offers no update call, so changing a provider means deleting and recreating it.
#[allow(async_fn_in_trait)]
pub trait OidcProviderApi {
	/// ARNs of every registered provider.
	async fn list_providers(&self) -> Result<Vec<String>>;

	/// Attributes of the provider with the given ARN.
	async fn get_provider(&self, arn: &str) -> Result<ProviderDetail>;

	/// Register a provider and return its ARN.
	async fn create_provider(
		&self,
		url: &str,
		client_ids: &[String],
		thumbprints: &[String],
	) -> Result<String>;

	/// Remove the provider with the given ARN.
	async fn delete_provider(&self, arn: &str) -> Result<()>;
}
