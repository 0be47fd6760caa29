//! Set comparison between the live provider and the desired state.

// std
use std::collections::BTreeSet;
// self
use crate::{iam::wire::ProviderDetail, provider::desired::DesiredState};

/// Differences for one list, compared as sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListDrift {
	/// Desired values the provider lacks.
	pub adding: BTreeSet<String>,
	/// Provider values no longer desired.
	pub removing: BTreeSet<String>,
}
impl ListDrift {
	/// Compare a current list against a desired one, ignoring order and repeats.
	pub fn between(current: &[String], desired: &[String]) -> Self {
		let current = current.iter().cloned().collect::<BTreeSet<_>>();
		let desired = desired.iter().cloned().collect::<BTreeSet<_>>();

		Self {
			adding: desired.difference(&current).cloned().collect(),
			removing: current.difference(&desired).cloned().collect(),
		}
	}

	/// Whether the two sets are equal.
	pub fn is_empty(&self) -> bool {
		self.adding.is_empty() && self.removing.is_empty()
	}
}

/// Differences for both lists of a provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Drift {
	/// Client ID differences.
	pub client_ids: ListDrift,
	/// Thumbprint differences.
	pub thumbprints: ListDrift,
}
impl Drift {
	/// Compare a live provider against the desired state.
	pub fn between(current: &ProviderDetail, desired: &DesiredState) -> Self {
		Self {
			client_ids: ListDrift::between(&current.client_ids, &desired.client_ids),
			thumbprints: ListDrift::between(&current.thumbprints, &desired.thumbprints),
		}
	}

	/// Whether the provider already matches.
	pub fn in_sync(&self) -> bool {
		self.client_ids.is_empty() && self.thumbprints.is_empty()
	}
}
