use thiserror::Error;

/// Error variants for model construction, queries, generation and restoration.
///
/// Variants fall into three groups with different handling expectations:
/// - caller bugs that should fail fast (`KgramLength`, `TargetTooShort`),
/// - checked input preconditions (`InvalidOrder`, `TextTooShort`,
///   `OrderMismatch`, `MarkerTooClose`),
/// - data-dependent failures that callers may want to handle per case
///   (`UnknownKgram`, `UnresolvableMarker`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// The model order must be a positive number of characters.
	#[error("model order must be at least 1")]
	InvalidOrder,

	/// The training text cannot form a single context of the requested order.
	#[error("training text has {length} characters, need at least {order}")]
	TextTooShort { length: usize, order: usize },

	/// Two models of different orders cannot be combined.
	#[error("cannot merge a model of order {left} with a model of order {right}")]
	OrderMismatch { left: usize, right: usize },

	/// A kgram argument whose character count does not match the model order.
	#[error("kgram `{kgram}` is not of length {order}")]
	KgramLength { kgram: String, order: usize },

	/// A generation target shorter than the starting kgram.
	#[error("target length {target} is below the model order {order}")]
	TargetTooShort { target: usize, order: usize },

	/// A context that never occurred in the training text.
	#[error("kgram `{0}` was never observed")]
	UnknownKgram(String),

	/// A marker without enough known characters on both sides.
	#[error("marker at position {position} needs {order} known characters on each side")]
	MarkerTooClose { position: usize, order: usize },

	/// A marker whose preceding context admits no candidate characters.
	#[error("marker at position {position}: context `{context}` was never observed")]
	UnresolvableMarker { position: usize, context: String },
}

/// A specialized Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
