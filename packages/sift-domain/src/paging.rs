use crate::BackendMode;

/// Page size and the sparse-page rule used to decide on auto-continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingPolicy {
	pub page_size: u32,
	pub min_results: u32,
}
impl PagingPolicy {
	/// A short page is followed up automatically while fewer than
	/// `min(min_results, page_size / 2)` results are visible and the stream is not exhausted.
	pub fn should_auto_continue(&self, returned: usize, visible: usize, has_more: bool) -> bool {
		has_more
			&& returned < self.page_size as usize
			&& visible < auto_continue_threshold(self.page_size, self.min_results)
	}
}
impl Default for PagingPolicy {
	fn default() -> Self {
		Self { page_size: 50, min_results: 20 }
	}
}

pub fn auto_continue_threshold(page_size: u32, min_results: u32) -> usize {
	min_results.min(page_size / 2) as usize
}

/// Whether another page should be requested after one returned `returned` items.
///
/// Cursor mode stops only on an empty page. Legacy mode continues while pages are full and the
/// running total is below the declared total; without a declared total a full page is enough.
pub fn has_more(
	mode: BackendMode,
	returned: usize,
	page_size: u32,
	running_total: u64,
	declared_total: Option<u64>,
) -> bool {
	match mode {
		BackendMode::Cursor => returned > 0,
		BackendMode::Legacy => {
			let full_page = returned == page_size as usize;

			match declared_total {
				Some(total) => full_page && running_total < total,
				None => full_page,
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cursor_mode_ends_only_on_empty_page() {
		assert!(has_more(BackendMode::Cursor, 3, 50, 3, Some(3)));
		assert!(!has_more(BackendMode::Cursor, 0, 50, 40, Some(1_000)));
	}

	#[test]
	fn legacy_mode_needs_full_page_below_total() {
		assert!(has_more(BackendMode::Legacy, 50, 50, 50, Some(120)));
		assert!(!has_more(BackendMode::Legacy, 30, 50, 80, Some(120)));
		assert!(!has_more(BackendMode::Legacy, 50, 50, 120, Some(120)));
		assert!(has_more(BackendMode::Legacy, 50, 50, 50, None));
	}

	#[test]
	fn threshold_is_capped_by_half_page() {
		assert_eq!(auto_continue_threshold(50, 20), 20);
		assert_eq!(auto_continue_threshold(10, 20), 5);
	}

	#[test]
	fn sparse_first_page_continues() {
		let policy = PagingPolicy::default();

		assert!(policy.should_auto_continue(12, 12, true));
		assert!(!policy.should_auto_continue(25, 25, true));
		assert!(!policy.should_auto_continue(12, 12, false));
		assert!(!policy.should_auto_continue(50, 10, true));
	}
}
