use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the visible result list.
///
/// The payload is opaque: the engine only ever reads the identifier and, when browsing
/// similar items, a description field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
	pub id: String,
	pub score: f64,
	pub payload: Value,
}
impl ResultItem {
	pub fn new(id: impl Into<String>, score: f64, payload: Value) -> Self {
		Self { id: id.into(), score, payload }
	}

	/// Builds an item from a backend object. The id may be a string or an integer; a missing
	/// score reads as zero.
	pub fn from_payload(payload: Value) -> Option<Self> {
		let id = match payload.get("id")? {
			Value::String(id) if !id.trim().is_empty() => id.clone(),
			Value::Number(id) => id.to_string(),
			_ => return None,
		};
		let score = payload.get("score").and_then(Value::as_f64).unwrap_or(0.0);

		Some(Self { id, score, payload })
	}

	/// Non-blank text stored under `field`, if any.
	pub fn description(&self, field: &str) -> Option<&str> {
		self.payload
			.get(field)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|text| !text.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_integer_ids() {
		let item = ResultItem::from_payload(serde_json::json!({ "id": 42, "score": 0.7 }))
			.expect("item should parse");

		assert_eq!(item.id, "42");
		assert_eq!(item.score, 0.7);
	}

	#[test]
	fn rejects_blank_or_missing_ids() {
		assert!(ResultItem::from_payload(serde_json::json!({ "id": "  " })).is_none());
		assert!(ResultItem::from_payload(serde_json::json!({ "score": 1.0 })).is_none());
	}

	#[test]
	fn blank_description_reads_as_absent() {
		let item = ResultItem::new("a", 0.0, serde_json::json!({ "description": "   " }));

		assert_eq!(item.description("description"), None);
	}
}
