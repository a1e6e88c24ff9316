use std::sync::Arc;

use crate::profile::ParseVersionError;

/// Which kind of lookup key collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
	Primary,
	Alias,
}

impl std::fmt::Display for KeyKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Primary => write!(f, "primary"),
			Self::Alias => write!(f, "alias"),
		}
	}
}

/// Malformed registration input, detected by `register_root`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
	#[error("empty {kind} key under {path:?}")]
	EmptyKey { kind: KeyKind, path: Arc<str> },

	#[error("{path}: variant #{index} has an empty or inverted range [{min}, {max})")]
	InvalidRange {
		path: Arc<str>,
		index: usize,
		min: String,
		max: String,
	},

	#[error("duplicate {kind} key {key:?}: owned by {existing} and {incoming}")]
	DuplicateKey {
		kind: KeyKind,
		key: Arc<str>,
		existing: Arc<str>,
		incoming: Arc<str>,
	},

	#[error("{path}: variants #{first} ({first_pred}) and #{second} ({second_pred}) overlap")]
	OverlappingVariants {
		path: Arc<str>,
		first: usize,
		second: usize,
		first_pred: String,
		second_pred: String,
	},

	#[error("{path}: {source}")]
	InvalidVersion {
		path: Arc<str>,
		#[source]
		source: ParseVersionError,
	},
}

/// Registration/query ordering violations around [`crate::Registry::freeze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LateRegistrationError {
	#[error("registry {0:?} is already frozen")]
	AlreadyFrozen(&'static str),

	#[error("registry {0:?} was queried before freeze")]
	NotFrozen(&'static str),
}

/// Failure to load a compiled catalogue blob.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("catalogue blob has a bad header or schema version")]
	BadHeader,

	#[error("catalogue blob failed to decode: {0}")]
	Decode(#[from] postcard::Error),
}

/// Any registry error, for callers that propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error(transparent)]
	Registration(#[from] RegistrationError),

	#[error(transparent)]
	Late(#[from] LateRegistrationError),

	#[error(transparent)]
	Load(#[from] LoadError),
}
