use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BackendMode, DistanceStrategy, Filters, ResultItem};

/// The bound a max-distance setting turns into for the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceBound {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_distance: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_score: Option<f32>,
}
impl DistanceBound {
	pub fn new(max_distance: f32, strategy: DistanceStrategy) -> Self {
		let min_score = 1.0 - max_distance;

		match strategy {
			DistanceStrategy::MaxDistance =>
				Self { max_distance: Some(max_distance), min_score: None },
			DistanceStrategy::MinScore => Self { max_distance: None, min_score: Some(min_score) },
			DistanceStrategy::Both =>
				Self { max_distance: Some(max_distance), min_score: Some(min_score) },
		}
	}
}

/// One page request as sent to the search backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub filters: Filters,
	pub page: u32,
	pub page_size: u32,
	pub mode: BackendMode,
	pub hybrid_weight: f32,
	#[serde(flatten)]
	pub distance: DistanceBound,
	pub max_distance_strategy: DistanceStrategy,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exclude_ids: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cursor_offset: Option<Value>,
}

/// One page as returned by the search backend.
///
/// `seen_ids` and `next_offset` are pagination state the backend may hand back; either, both,
/// or neither can be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPage {
	pub results: Vec<ResultItem>,
	pub num_hits_estimate: Option<u64>,
	pub seen_ids: Option<Vec<String>>,
	pub next_offset: Option<Value>,
}
impl SearchPage {
	pub fn with_results(results: Vec<ResultItem>) -> Self {
		Self { results, ..Default::default() }
	}
}
