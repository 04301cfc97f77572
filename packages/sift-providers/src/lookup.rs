use std::fmt::Write;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use sift_config::Backend;
use sift_domain::ResultItem;

/// Fetches the full record of one item.
pub async fn lookup_by_id(client: &Client, cfg: &Backend, id: &str) -> Result<ResultItem> {
	let url = format!("{}/{}", crate::endpoint(cfg, &cfg.lookup_path), encode_segment(id));
	let res = client.get(url).headers(crate::headers_for(cfg)?).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_lookup_response(json, id)
}

fn parse_lookup_response(json: Value, requested: &str) -> Result<ResultItem> {
	let raw = match json {
		Value::Object(mut map) if map.get("item").is_some_and(Value::is_object) =>
			map.remove("item").unwrap_or_default(),
		other => other,
	};
	let item = ResultItem::from_payload(raw)
		.ok_or_else(|| Error::invalid_response("Lookup response is missing an id."))?;

	if item.id != requested {
		return Err(Error::invalid_response(format!(
			"Lookup for {requested} returned item {}.",
			item.id
		)));
	}

	Ok(item)
}

fn encode_segment(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for byte in raw.bytes() {
		if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
			out.push(byte as char);
		} else {
			let _ = write!(out, "%{byte:02X}");
		}
	}

	out
}
