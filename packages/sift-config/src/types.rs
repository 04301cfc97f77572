use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub backend: Backend,
	#[serde(default)]
	pub paging: Paging,
	#[serde(default)]
	pub debounce: Debounce,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub similar: Similar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Remote search service the client talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct Backend {
	pub api_base: String,
	/// Optional. Blank keys are treated as absent.
	pub api_key: Option<String>,
	#[serde(default = "default_search_path")]
	pub search_path: String,
	#[serde(default = "default_lookup_path")]
	pub lookup_path: String,
	#[serde(default = "default_phrases_path")]
	pub phrases_path: String,
	/// Upper bound for one page request; exceeding it counts as a transport failure.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
	pub page_size: u32,
	/// Sparse pages are followed up while fewer than `min(min_results, page_size / 2)` results
	/// are visible.
	pub min_results: u32,
	pub auto_continue_delay_ms: u64,
}
impl Default for Paging {
	fn default() -> Self {
		Self { page_size: 50, min_results: 20, auto_continue_delay_ms: 100 }
	}
}

/// Trailing-edge debounce windows for the free-form inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct Debounce {
	pub query_ms: u64,
	pub hybrid_weight_ms: u64,
	pub max_distance_ms: u64,
}
impl Default for Debounce {
	fn default() -> Self {
		Self { query_ms: 500, hybrid_weight_ms: 300, max_distance_ms: 300 }
	}
}

/// Initial search parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	pub mode: String,
	pub hybrid_weight: f32,
	pub max_distance: f32,
	pub max_distance_strategy: String,
	/// Query sent when the search box is empty.
	pub wildcard: String,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			mode: "cursor".to_string(),
			hybrid_weight: 0.5,
			max_distance: 1.0,
			max_distance_strategy: "max_distance".to_string(),
			wildcard: "*".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Similar {
	pub description_field: String,
}
impl Default for Similar {
	fn default() -> Self {
		Self { description_field: "description".to_string() }
	}
}

fn default_search_path() -> String {
	"/v1/search".to_string()
}

fn default_lookup_path() -> String {
	"/v1/items".to_string()
}

fn default_phrases_path() -> String {
	"/v1/keyword_phrases".to_string()
}

fn default_timeout_ms() -> u64 {
	60_000
}
