use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Category name to the set of selected values within it.
pub type Filters = BTreeMap<String, BTreeSet<String>>;

/// Backend pagination protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
	/// Offset/count pagination; the client sends the ids it has already seen.
	Legacy,
	/// Opaque cursor pagination; an empty page is the only end-of-stream signal.
	#[default]
	Cursor,
}
impl BackendMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Legacy => "legacy",
			Self::Cursor => "cursor",
		}
	}
}
impl FromStr for BackendMode {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"legacy" => Ok(Self::Legacy),
			"cursor" => Ok(Self::Cursor),
			_ => Err(Error::UnknownBackendMode { value: value.to_string() }),
		}
	}
}
impl fmt::Display for BackendMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How the max-distance slider is translated into a backend bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceStrategy {
	#[default]
	MaxDistance,
	MinScore,
	Both,
}
impl DistanceStrategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::MaxDistance => "max_distance",
			Self::MinScore => "min_score",
			Self::Both => "both",
		}
	}
}
impl FromStr for DistanceStrategy {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"max_distance" => Ok(Self::MaxDistance),
			"min_score" => Ok(Self::MinScore),
			"both" => Ok(Self::Both),
			_ => Err(Error::UnknownDistanceStrategy { value: value.to_string() }),
		}
	}
}
impl fmt::Display for DistanceStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Everything a single search attempt is issued for.
///
/// Compared by value: any field differing from the parameters of the running session starts a
/// new session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
	pub query: String,
	pub filters: Filters,
	pub mode: BackendMode,
	pub hybrid_weight: f32,
	pub max_distance: f32,
	pub max_distance_strategy: DistanceStrategy,
	pub category: Option<String>,
	/// Set while browsing items similar to this anchor.
	pub anchor_id: Option<String>,
}
impl SearchParameters {
	pub fn is_similarity(&self) -> bool {
		self.anchor_id.is_some()
	}
}

/// A partial update coming from the UI layer. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterPatch {
	pub query: Option<String>,
	pub filters: Option<Filters>,
	pub mode: Option<BackendMode>,
	pub hybrid_weight: Option<f32>,
	pub max_distance: Option<f32>,
	pub max_distance_strategy: Option<DistanceStrategy>,
	pub category: Option<Option<String>>,
	pub anchor_id: Option<Option<String>>,
}
impl ParameterPatch {
	pub fn query(query: impl Into<String>) -> Self {
		Self { query: Some(query.into()), ..Default::default() }
	}

	pub fn mode(mode: BackendMode) -> Self {
		Self { mode: Some(mode), ..Default::default() }
	}

	pub fn filters(filters: Filters) -> Self {
		Self { filters: Some(filters), ..Default::default() }
	}

	pub fn hybrid_weight(weight: f32) -> Self {
		Self { hybrid_weight: Some(weight), ..Default::default() }
	}

	pub fn max_distance(distance: f32) -> Self {
		Self { max_distance: Some(distance), ..Default::default() }
	}

	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}
}
