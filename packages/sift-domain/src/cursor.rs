use std::collections::HashSet;

use serde_json::Value;

/// Pagination state of one search session.
///
/// Owned by the session loop and mutated in place, so the request for page N + 1 always reads
/// what page N recorded.
#[derive(Clone, Debug)]
pub struct PaginationCursor {
	page: u32,
	seen: Vec<String>,
	seen_index: HashSet<String>,
	next_offset: Option<Value>,
	has_more: bool,
	total_hits_estimate: u64,
}
impl PaginationCursor {
	pub fn new() -> Self {
		Self {
			page: 1,
			seen: Vec::new(),
			seen_index: HashSet::new(),
			next_offset: None,
			has_more: true,
			total_hits_estimate: 0,
		}
	}

	pub fn reset(&mut self) {
		self.page = 1;
		self.seen.clear();
		self.seen_index.clear();
		self.next_offset = None;
		self.has_more = true;
		self.total_hits_estimate = 0;
	}

	/// Adds `ids` to the seen-set in first-seen order. A missing `offset` keeps the previous one.
	pub fn record_page<I, S>(&mut self, ids: I, offset: Option<Value>)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for id in ids {
			let id = id.into();

			if self.seen_index.insert(id.clone()) {
				self.seen.push(id);
			}
		}

		if let Some(offset) = offset {
			self.next_offset = Some(offset);
		}
	}

	pub fn advance(&mut self) {
		self.page += 1;
	}

	/// Undoes an `advance` whose page never arrived.
	pub fn rewind(&mut self) {
		self.page = self.page.saturating_sub(1).max(1);
	}

	pub fn set_has_more(&mut self, has_more: bool) {
		self.has_more = has_more;
	}

	/// Takes the declared estimate on the first page and only ever raises it afterwards; it
	/// never drops below what is already visible.
	pub fn revise_total_hits(&mut self, declared: Option<u64>, visible: u64) {
		let declared = declared.unwrap_or(0);
		let base = if self.page <= 1 { declared } else { self.total_hits_estimate.max(declared) };

		self.total_hits_estimate = base.max(visible);
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn seen_ids(&self) -> &[String] {
		&self.seen
	}

	pub fn has_seen(&self, id: &str) -> bool {
		self.seen_index.contains(id)
	}

	pub fn next_offset(&self) -> Option<&Value> {
		self.next_offset.as_ref()
	}

	pub fn has_more(&self) -> bool {
		self.has_more
	}

	pub fn total_hits_estimate(&self) -> u64 {
		self.total_hits_estimate
	}
}
impl Default for PaginationCursor {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recording_is_idempotent_and_ordered() {
		let mut cursor = PaginationCursor::new();

		cursor.record_page(["a", "b"], None);
		cursor.record_page(["b", "c", "a"], None);

		assert_eq!(cursor.seen_ids(), ["a", "b", "c"]);
	}

	#[test]
	fn missing_offset_keeps_previous_value() {
		let mut cursor = PaginationCursor::new();

		cursor.record_page(["a"], Some(serde_json::json!("tok-1")));
		cursor.record_page(Vec::<String>::new(), None);

		assert_eq!(cursor.next_offset(), Some(&serde_json::json!("tok-1")));
	}

	#[test]
	fn reset_clears_everything() {
		let mut cursor = PaginationCursor::new();

		cursor.record_page(["a"], Some(serde_json::json!(50)));
		cursor.advance();
		cursor.set_has_more(false);
		cursor.reset();

		assert_eq!(cursor.page(), 1);
		assert!(cursor.seen_ids().is_empty());
		assert!(!cursor.has_seen("a"));
		assert!(cursor.next_offset().is_none());
		assert!(cursor.has_more());
	}

	#[test]
	fn rewind_never_goes_below_first_page() {
		let mut cursor = PaginationCursor::new();

		cursor.rewind();
		assert_eq!(cursor.page(), 1);

		cursor.advance();
		cursor.advance();
		cursor.rewind();
		assert_eq!(cursor.page(), 2);
	}

	#[test]
	fn total_hits_estimate_only_rises_mid_session() {
		let mut cursor = PaginationCursor::new();

		cursor.revise_total_hits(Some(120), 50);
		assert_eq!(cursor.total_hits_estimate(), 120);

		cursor.advance();
		cursor.revise_total_hits(Some(90), 100);
		assert_eq!(cursor.total_hits_estimate(), 120);

		cursor.revise_total_hits(None, 150);
		assert_eq!(cursor.total_hits_estimate(), 150);
	}
}
