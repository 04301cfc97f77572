mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Backend, Config, Debounce, Paging, Search, Service, Similar};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.backend.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "backend.api_base must be non-empty.".to_string() });
	}

	for (label, path) in [
		("backend.search_path", &cfg.backend.search_path),
		("backend.lookup_path", &cfg.backend.lookup_path),
		("backend.phrases_path", &cfg.backend.phrases_path),
	] {
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with '/'.") });
		}
	}

	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.backend.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("backend.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.paging.page_size == 0 {
		return Err(Error::Validation {
			message: "paging.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.paging.min_results == 0 {
		return Err(Error::Validation {
			message: "paging.min_results must be greater than zero.".to_string(),
		});
	}

	if !matches!(cfg.search.mode.as_str(), "legacy" | "cursor") {
		return Err(Error::UnknownLiteral {
			key: "search.mode",
			value: cfg.search.mode.clone(),
			expected: "legacy or cursor",
		});
	}
	if !matches!(cfg.search.max_distance_strategy.as_str(), "max_distance" | "min_score" | "both") {
		return Err(Error::UnknownLiteral {
			key: "search.max_distance_strategy",
			value: cfg.search.max_distance_strategy.clone(),
			expected: "max_distance, min_score, or both",
		});
	}

	for (label, value) in [
		("search.hybrid_weight", cfg.search.hybrid_weight),
		("search.max_distance", cfg.search.max_distance),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if !(0.0..=1.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	if cfg.search.wildcard.trim().is_empty() {
		return Err(Error::Validation { message: "search.wildcard must be non-empty.".to_string() });
	}
	if cfg.similar.description_field.trim().is_empty() {
		return Err(Error::Validation {
			message: "similar.description_field must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.backend.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.backend.api_key = None;
	}

	cfg.backend.api_base = cfg.backend.api_base.trim_end_matches('/').to_string();
	cfg.search.mode = cfg.search.mode.trim().to_ascii_lowercase();
	cfg.search.max_distance_strategy = cfg.search.max_distance_strategy.trim().to_ascii_lowercase();
}
