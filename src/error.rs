use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// A binding target or argument is missing or empty.
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	/// Bulk set algebra would produce more than one event per call.
	#[error("`{0}` is not supported by an observable set")]
	Unsupported(&'static str),

	#[error("index {index} is out of range for length {len}")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("an entry with the same key already exists")]
	DuplicateKey,
}
