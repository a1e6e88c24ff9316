//! Registry configuration.

use serde::{Deserialize, Serialize};

/// How registration treats declarations on one node whose predicates overlap.
///
/// Resolution is first-match regardless; the policy only controls reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
	/// Accept silently.
	Allow,
	/// Accept and log each overlapping pair.
	#[default]
	Warn,
	/// Reject the root with [`crate::RegistrationError::OverlappingVariants`].
	Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
	pub overlap_policy: OverlapPolicy,
	/// Expected number of distinct profiles; presizes the snapshot cache.
	pub expected_profiles: usize,
}

impl RegistryConfig {
	pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
		self.overlap_policy = policy;
		self
	}
}
