use std::{sync::Arc, time::Duration};

use tokio::time;

use crate::{Error, Result, SearchBackend};
use sift_domain::{
	BackendMode, DistanceBound, PaginationCursor, PagingPolicy, ResultItem, SearchPage,
	SearchParameters, SearchRequest,
};

/// What one page fetch did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
	Loaded { page: u32, returned: usize, has_more: bool, auto_continue: bool },
	Failed { page: u32, message: String },
}
impl FetchOutcome {
	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed { .. })
	}
}

/// Builds page requests, runs them under the timeout, and folds responses into the cursor and
/// the visible list.
#[derive(Clone)]
pub struct FetchOrchestrator {
	backend: Arc<dyn SearchBackend>,
	policy: PagingPolicy,
	timeout: Duration,
	wildcard: String,
}
impl FetchOrchestrator {
	pub fn new(
		backend: Arc<dyn SearchBackend>,
		policy: PagingPolicy,
		timeout: Duration,
		wildcard: impl Into<String>,
	) -> Self {
		Self { backend, policy, timeout, wildcard: wildcard.into() }
	}

	/// Page 1 carries only the anchor exclusion, if any. Later pages carry the seen-set in legacy
	/// mode and the backend cursor in cursor mode, both read from `cursor` as it stands now.
	pub fn build_request(
		&self,
		params: &SearchParameters,
		page: u32,
		cursor: &PaginationCursor,
	) -> SearchRequest {
		let query = if params.query.trim().is_empty() {
			self.wildcard.clone()
		} else {
			params.query.trim().to_string()
		};
		let (exclude_ids, cursor_offset) = if page <= 1 {
			(params.anchor_id.clone().map(|id| vec![id]), None)
		} else {
			match params.mode {
				BackendMode::Legacy => {
					let mut ids = cursor.seen_ids().to_vec();

					if let Some(anchor) = &params.anchor_id
						&& !cursor.has_seen(anchor)
					{
						ids.push(anchor.clone());
					}

					(Some(ids), None)
				},
				BackendMode::Cursor => (None, cursor.next_offset().cloned()),
			}
		};

		SearchRequest {
			query,
			filters: params.filters.clone(),
			page,
			page_size: self.policy.page_size,
			mode: params.mode,
			hybrid_weight: params.hybrid_weight,
			distance: DistanceBound::new(params.max_distance, params.max_distance_strategy),
			max_distance_strategy: params.max_distance_strategy,
			category: params.category.clone(),
			exclude_ids,
			cursor_offset,
		}
	}

	/// Runs one request. Running past the timeout is reported like any other failure.
	pub async fn execute(&self, request: &SearchRequest) -> Result<SearchPage> {
		match time::timeout(self.timeout, self.backend.search(request)).await {
			Ok(result) => result,
			Err(_) => Err(Error::Timeout { after_ms: self.timeout.as_millis() as u64 }),
		}
	}

	/// Folds a finished request into the session.
	///
	/// Success records pagination state before anything else so the next request reads it, then
	/// replaces (page 1) or extends the visible list. Failure leaves the list alone and steps the
	/// cursor back to the last page that did arrive.
	pub fn resolve(
		&self,
		mode: BackendMode,
		page: u32,
		result: Result<SearchPage>,
		cursor: &mut PaginationCursor,
		results: &mut Vec<ResultItem>,
	) -> FetchOutcome {
		let SearchPage { results: items, num_hits_estimate, seen_ids, next_offset } = match result {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!(error = %err, page, mode = %mode, "Search request failed.");

				if page > 1 {
					cursor.rewind();
				}

				return FetchOutcome::Failed { page, message: err.to_string() };
			},
		};
		let returned = items.len();

		match seen_ids {
			Some(ids) => cursor.record_page(ids, next_offset),
			None => cursor.record_page(items.iter().map(|item| item.id.clone()), next_offset),
		}

		if page <= 1 {
			*results = items;
		} else {
			results.extend(items);
		}

		let visible = results.len();

		cursor.revise_total_hits(num_hits_estimate, visible as u64);

		let has_more = sift_domain::has_more(
			mode,
			returned,
			self.policy.page_size,
			visible as u64,
			num_hits_estimate,
		);

		cursor.set_has_more(has_more);

		let auto_continue = self.policy.should_auto_continue(returned, visible, has_more);

		tracing::debug!(page, returned, visible, has_more, auto_continue, "Search page merged.");

		FetchOutcome::Loaded { page, returned, has_more, auto_continue }
	}

	/// Builds, runs and resolves one page in sequence. Never fails; see [`FetchOutcome`].
	pub async fn fetch_page(
		&self,
		params: &SearchParameters,
		page: u32,
		cursor: &mut PaginationCursor,
		results: &mut Vec<ResultItem>,
	) -> FetchOutcome {
		let request = self.build_request(params, page, cursor);
		let result = self.execute(&request).await;

		self.resolve(params.mode, page, result, cursor, results)
	}
}
