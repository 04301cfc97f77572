use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use sift_config::Backend;

/// Fetches the phrases that mark a query as a pure keyword lookup.
pub async fn keyword_phrases(client: &Client, cfg: &Backend) -> Result<Vec<String>> {
	let url = crate::endpoint(cfg, &cfg.phrases_path);
	let res = client.get(url).headers(crate::headers_for(cfg)?).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_phrases_response(json)
}

fn parse_phrases_response(json: Value) -> Result<Vec<String>> {
	let list = json
		.as_array()
		.or_else(|| json.get("phrases").and_then(Value::as_array))
		.ok_or_else(|| Error::invalid_response("Keyword phrase response is missing a list."))?;

	Ok(list
		.iter()
		.filter_map(Value::as_str)
		.map(str::trim)
		.filter(|phrase| !phrase.is_empty())
		.map(str::to_string)
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_bare_and_wrapped_lists() {
		let bare = serde_json::json!(["rainfall", " ", 3, "sea ice"]);
		let wrapped = serde_json::json!({ "phrases": ["rainfall"] });

		assert_eq!(parse_phrases_response(bare).expect("parse failed"), vec!["rainfall", "sea ice"]);
		assert_eq!(parse_phrases_response(wrapped).expect("parse failed"), vec!["rainfall"]);
	}

	#[test]
	fn rejects_non_list_payload() {
		assert!(parse_phrases_response(serde_json::json!({ "count": 2 })).is_err());
	}
}
