//! Desired provider state loaded from value-list files.

// std
use std::{collections::HashSet, fs, path::Path};
// self
use crate::_prelude::*;

/// Client IDs and thumbprints the provider should carry, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesiredState {
	/// Audiences to register.
	pub client_ids: Vec<String>,
	/// Certificate thumbprints to register.
	pub thumbprints: Vec<String>,
}
impl DesiredState {
	/// Load both lists.
	///
	/// Both paths are checked for existence before either file is read, so a missing file is
	/// reported without any partial work.
	pub fn load(client_ids: &Path, thumbprints: &Path) -> Result<Self> {
		for path in [client_ids, thumbprints] {
			if !path.is_file() {
				return Err(Error::InputFile {
					path: path.to_path_buf(),
					reason: "not found".into(),
				});
			}
		}

		let state =
			Self { client_ids: load_values(client_ids)?, thumbprints: load_values(thumbprints)? };

		tracing::debug!(
			client_ids = state.client_ids.len(),
			thumbprints = state.thumbprints.len(),
			"desired state loaded"
		);

		Ok(state)
	}
}

/// Read one value per line from a file; see [`parse_values`].
///
/// A file without any value is rejected.
pub fn load_values(path: &Path) -> Result<Vec<String>> {
	let text = fs::read_to_string(path).map_err(|err| Error::InputFile {
		path: path.to_path_buf(),
		reason: format!("unreadable: {err}"),
	})?;
	let values = parse_values(&text);

	if values.is_empty() {
		return Err(Error::InputFile {
			path: path.to_path_buf(),
			reason: "contains no values".into(),
		});
	}

	Ok(values)
}

/// Trimmed values, one per line, skipping blank and `#` comment lines and repeated values.
pub fn parse_values(text: &str) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut values = Vec::new();

	for line in text.lines().map(str::trim) {
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		if !seen.insert(line) {
			tracing::warn!(value = %line, "duplicate value ignored");

			continue;
		}

		values.push(line.to_string());
	}

	values
}
