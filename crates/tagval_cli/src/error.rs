use tagval::proto::ProtoError;
use thiserror::Error;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec failure.
	#[error(transparent)]
	Proto(#[from] ProtoError),
	/// Filesystem failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON syntax or shape failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// JSON `type` or `element` label is not a known kind.
	#[error("unknown type label {label:?}")]
	UnknownType {
		/// Label as written in the input.
		label: String,
	},
	/// JSON value does not fit the declared kind.
	#[error("invalid {kind} value for node {name:?}: {reason}")]
	InvalidValue {
		/// Node name from the input.
		name: String,
		/// Declared kind label.
		kind: &'static str,
		/// What was wrong with the value.
		reason: String,
	},
}
