//! Target profiles and their canonical cache keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(u16);

impl FamilyId {
	/// Returns the family with the given raw identifier.
	pub const fn new(raw: u16) -> Self {
		Self(raw)
	}

	/// Returns the raw identifier.
	pub const fn as_u16(self) -> u16 {
		self.0
	}
}

impl fmt::Display for FamilyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A totally ordered product version, `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
	pub major: u32,
	pub minor: u16,
}

impl Version {
	/// Returns version `major.minor`.
	pub const fn new(major: u32, minor: u16) -> Self {
		Self { major, minor }
	}

	/// Returns version `major.0`.
	pub const fn major(major: u32) -> Self {
		Self { major, minor: 0 }
	}
}

impl From<u32> for Version {
	fn from(major: u32) -> Self {
		Version::major(major)
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.minor == 0 {
			write!(f, "{}", self.major)
		} else {
			write!(f, "{}.{}", self.major, self.minor)
		}
	}
}

/// A version string that is not `major` or `major.minor`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version {input:?}")]
pub struct ParseVersionError {
	pub input: String,
}

impl FromStr for Version {
	type Err = ParseVersionError;

	/// Parses `"61"` or `"17.4"`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || ParseVersionError { input: s.to_string() };
		let trimmed = s.trim();
		let (major, minor) = match trimmed.split_once('.') {
			Some((major, minor)) => (major, minor),
			None => (trimmed, "0"),
		};
		let major = major.parse::<u32>().map_err(|_| err())?;
		let minor = minor.parse::<u16>().map_err(|_| err())?;
		Ok(Version::new(major, minor))
	}
}

/// The (family, version) pair resolution is performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileDescriptor {
	pub family: FamilyId,
	pub version: Version,
}

impl ProfileDescriptor {
	/// Returns the profile for `family` at `version`.
	pub const fn new(family: FamilyId, version: Version) -> Self {
		Self { family, version }
	}

	/// Returns the canonical cache key for this profile.
	pub const fn canonical_key(&self) -> ProfileKey {
		ProfileKey::new(self.family, self.version)
	}
}

impl fmt::Display for ProfileDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.family, self.version)
	}
}

/// Canonical cache key of a [`ProfileDescriptor`].
///
/// Packs `family << 48 | major << 16 | minor`, so distinct descriptors never share a key.
/// Only the snapshot cache indexes by this; resolution compares structured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileKey(u64);

impl ProfileKey {
	/// Packs `family` and `version` into one key.
	pub const fn new(family: FamilyId, version: Version) -> Self {
		Self(((family.0 as u64) << 48) | ((version.major as u64) << 16) | version.minor as u64)
	}

	/// Returns the packed family.
	pub const fn family(self) -> FamilyId {
		FamilyId((self.0 >> 48) as u16)
	}

	/// Returns the packed version.
	pub const fn version(self) -> Version {
		Version::new((self.0 >> 16) as u32, self.0 as u16)
	}
}

impl From<ProfileDescriptor> for ProfileKey {
	fn from(profile: ProfileDescriptor) -> Self {
		profile.canonical_key()
	}
}

impl fmt::Display for ProfileKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.family(), self.version())
	}
}
