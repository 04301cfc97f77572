use std::collections::HashSet;

use sift_domain::{
	BackendMode, PaginationCursor, PagingPolicy, ParameterPatch, ResultItem, derive_hybrid_weight,
	has_more,
};

fn page_ids(page: u32, len: usize) -> Vec<String> {
	(0..len).map(|idx| format!("p{page}-{idx}")).collect()
}

#[test]
fn seen_set_grows_monotonically_within_a_session() {
	let mut cursor = PaginationCursor::new();
	let mut previous: HashSet<String> = HashSet::new();

	for page in 1..=5 {
		// Every page repeats one id from the page before.
		let mut ids = page_ids(page, 10);

		if page > 1 {
			ids.push(format!("p{}-0", page - 1));
		}

		cursor.record_page(ids, None);
		cursor.advance();

		let current: HashSet<String> = cursor.seen_ids().iter().cloned().collect();

		assert!(current.is_superset(&previous), "page {page} dropped a seen id");
		assert_eq!(current.len(), cursor.seen_ids().len(), "seen ids must stay unique");

		previous = current;
	}

	assert_eq!(cursor.seen_ids().len(), 50);

	cursor.reset();

	assert!(cursor.seen_ids().is_empty());
}

#[test]
fn legacy_termination_follows_declared_total() {
	let policy = PagingPolicy::default();

	assert!(has_more(BackendMode::Legacy, 50, policy.page_size, 50, Some(120)));
	assert!(!has_more(BackendMode::Legacy, 30, policy.page_size, 30, Some(120)));
	assert!(!has_more(BackendMode::Legacy, 30, policy.page_size, 30, Some(10_000)));
}

#[test]
fn cursor_termination_ignores_estimate() {
	assert!(!has_more(BackendMode::Cursor, 0, 50, 0, Some(10_000)));
}

#[test]
fn derived_weight_matches_keyword_intent() {
	let phrases = vec!["air temperature".to_string()];

	assert_eq!(derive_hybrid_weight("", "*", &phrases), 0.5);
	assert_eq!(derive_hybrid_weight("*", "*", &phrases), 0.5);
	assert_eq!(derive_hybrid_weight("Air Temperature", "*", &phrases), 0.0);
	assert_eq!(derive_hybrid_weight("air temperature anomalies", "*", &phrases), 0.5);
}

#[test]
fn description_comes_from_configured_field() {
	let item = ResultItem::from_payload(serde_json::json!({
		"id": "ds-1",
		"abstract": "Daily gridded rainfall.",
	}))
	.expect("item should parse");

	assert_eq!(item.description("abstract"), Some("Daily gridded rainfall."));
	assert_eq!(item.description("description"), None);
}

#[test]
fn empty_patch_is_detected() {
	assert!(ParameterPatch::default().is_empty());
	assert!(!ParameterPatch::query("rain").is_empty());
}
