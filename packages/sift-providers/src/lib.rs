pub mod lookup;
pub mod phrases;
pub mod search;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use sift_config::Backend;

/// Builds the shared HTTP client. The configured timeout applies to every call.
pub fn client(cfg: &Backend) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn endpoint(cfg: &Backend, path: &str) -> String {
	format!("{}{}", cfg.api_base, path)
}

pub(crate) fn headers_for(cfg: &Backend) -> Result<HeaderMap> {
	auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)
}
