use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use sift_config::Backend;
use sift_domain::{ResultItem, SearchPage, SearchRequest};

pub async fn search(
	client: &Client,
	cfg: &Backend,
	request: &SearchRequest,
) -> Result<SearchPage> {
	let url = crate::endpoint(cfg, &cfg.search_path);

	tracing::debug!(%url, page = request.page, mode = %request.mode, "Sending search request.");

	let res = client.post(url).headers(crate::headers_for(cfg)?).json(request).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<SearchPage> {
	let raw_results = json
		.get("results")
		.or_else(|| json.get("hits"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::invalid_response("Search response is missing results array."))?;
	let mut results = Vec::with_capacity(raw_results.len());

	for raw in raw_results {
		let item = ResultItem::from_payload(raw.clone())
			.ok_or_else(|| Error::invalid_response("Search result is missing an id."))?;

		results.push(item);
	}

	let num_hits_estimate =
		json.get("num_hits_estimate").or_else(|| json.get("total")).and_then(Value::as_u64);
	let seen_ids = match json.get("seen_ids") {
		None | Some(Value::Null) => None,
		Some(Value::Array(ids)) => Some(parse_ids(ids)?),
		Some(_) =>
			return Err(Error::invalid_response("Search response seen_ids must be an array.")),
	};
	let next_offset = json.get("next_offset").filter(|offset| !offset.is_null()).cloned();

	Ok(SearchPage { results, num_hits_estimate, seen_ids, next_offset })
}

fn parse_ids(ids: &[Value]) -> Result<Vec<String>> {
	ids.iter()
		.map(|id| match id {
			Value::String(id) => Ok(id.clone()),
			Value::Number(id) => Ok(id.to_string()),
			_ => Err(Error::invalid_response("Seen ids must be strings or integers.")),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_results_and_pagination_state() {
		let json = serde_json::json!({
			"results": [
				{ "id": "a", "score": 0.9, "title": "A" },
				{ "id": 7, "score": 0.4 }
			],
			"num_hits_estimate": 120,
			"seen_ids": ["a", 7],
			"next_offset": { "after": "7" }
		});
		let page = parse_search_response(json).expect("parse failed");

		assert_eq!(page.results.len(), 2);
		assert_eq!(page.results[0].payload["title"], "A");
		assert_eq!(page.results[1].id, "7");
		assert_eq!(page.num_hits_estimate, Some(120));
		assert_eq!(page.seen_ids, Some(vec!["a".to_string(), "7".to_string()]));
		assert_eq!(page.next_offset, Some(serde_json::json!({ "after": "7" })));
	}

	#[test]
	fn accepts_hits_alias_and_missing_state() {
		let json = serde_json::json!({ "hits": [], "next_offset": null });
		let page = parse_search_response(json).expect("parse failed");

		assert!(page.results.is_empty());
		assert!(page.seen_ids.is_none());
		assert!(page.next_offset.is_none());
		assert!(page.num_hits_estimate.is_none());
	}

	#[test]
	fn rejects_items_without_id() {
		let json = serde_json::json!({ "results": [{ "score": 1.0 }] });

		assert!(parse_search_response(json).is_err());
	}
}
