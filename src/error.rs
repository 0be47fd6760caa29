//! Crate-wide error types and `Result` alias.

// std
use std::path::PathBuf;

/// Library-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the RadosGW OIDC tools.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Jsonwebtoken(#[from] jsonwebtoken::errors::Error),
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	Serde(#[from] serde_json::Error),
	#[error(transparent)]
	Url(#[from] url::ParseError),
	#[error(transparent)]
	Xml(#[from] quick_xml::DeError),

	#[error("IAM {operation} failed: {code}: {message}")]
	Api { operation: &'static str, code: String, message: String },
	#[error("Operation cancelled by user.")]
	Aborted,
	#[error("Invalid configuration for {field}: {reason}")]
	Config { field: &'static str, reason: String },
	#[error("Failed to decode token: {0}")]
	Decode(String),
	#[error("Upstream HTTP status {status} from {url}: {body:?}")]
	HttpStatus { status: http::StatusCode, url: url::Url, body: Option<String> },
	#[error("Input file '{}': {reason}", path.display())]
	InputFile { path: PathBuf, reason: String },
	#[error("No access token in response: {0}")]
	MissingToken(String),
}
impl Error {
	/// Process exit code the command-line tools report for this error.
	pub fn exit_code(&self) -> u8 {
		match self {
			Self::Aborted => 0,
			_ => 1,
		}
	}
}
