use std::time::Duration;

use tokio::time::Instant;

use sift_domain::{BackendMode, DistanceStrategy, Filters, ParameterPatch, SearchParameters};

/// A trailing-edge debounced value.
///
/// `live` follows every write. `settled` catches up once the input has been left alone for the
/// whole delay; each write restarts the wait.
#[derive(Clone, Debug)]
pub struct Debounced<T> {
	live: T,
	settled: T,
	delay: Duration,
	deadline: Option<Instant>,
}
impl<T> Debounced<T>
where
	T: Clone + PartialEq,
{
	pub fn new(value: T, delay: Duration) -> Self {
		Self { live: value.clone(), settled: value, delay, deadline: None }
	}

	pub fn set(&mut self, value: T, now: Instant) {
		self.live = value;

		if self.delay.is_zero() {
			self.settled = self.live.clone();
			self.deadline = None;
		} else {
			self.deadline = Some(now + self.delay);
		}
	}

	/// Writes both copies at once and drops any pending settle.
	pub fn force(&mut self, value: T) {
		self.live = value.clone();
		self.settled = value;
		self.deadline = None;
	}

	/// Settles the live value if its deadline has passed. Returns whether `settled` changed.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.deadline {
			Some(deadline) if deadline <= now => {
				self.deadline = None;

				if self.settled == self.live {
					return false;
				}

				self.settled = self.live.clone();

				true
			},
			_ => false,
		}
	}

	pub fn live(&self) -> &T {
		&self.live
	}

	pub fn settled(&self) -> &T {
		&self.settled
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
	text: String,
	anchor_id: Option<String>,
}

/// Live and settled values of every search input.
///
/// Query text, hybrid weight and max-distance are debounced. Filters, mode, strategy and category
/// take effect immediately. The similarity anchor travels with the query text so that it settles
/// together with the query it belongs to.
#[derive(Clone, Debug)]
pub struct ParameterStore {
	query: Debounced<QueryInput>,
	hybrid_weight: Debounced<f32>,
	max_distance: Debounced<f32>,
	filters: Filters,
	mode: BackendMode,
	max_distance_strategy: DistanceStrategy,
	category: Option<String>,
}
impl ParameterStore {
	pub fn new(
		initial: SearchParameters,
		query_delay: Duration,
		hybrid_weight_delay: Duration,
		max_distance_delay: Duration,
	) -> Self {
		let SearchParameters {
			query,
			filters,
			mode,
			hybrid_weight,
			max_distance,
			max_distance_strategy,
			category,
			anchor_id,
		} = initial;

		Self {
			query: Debounced::new(QueryInput { text: query, anchor_id }, query_delay),
			hybrid_weight: Debounced::new(hybrid_weight, hybrid_weight_delay),
			max_distance: Debounced::new(max_distance, max_distance_delay),
			filters,
			mode,
			max_distance_strategy,
			category,
		}
	}

	/// Applies a UI patch. A new query without an explicit anchor leaves similarity mode.
	///
	/// Non-finite weights and distances are dropped; they never compare equal and would restart
	/// the session on every pass.
	pub fn apply(&mut self, patch: ParameterPatch, now: Instant) {
		let ParameterPatch {
			query,
			filters,
			mode,
			hybrid_weight,
			max_distance,
			max_distance_strategy,
			category,
			anchor_id,
		} = patch;

		match (query, anchor_id) {
			(Some(text), anchor_id) =>
				self.query.set(QueryInput { text, anchor_id: anchor_id.flatten() }, now),
			(None, Some(anchor_id)) => {
				let text = self.query.live().text.clone();

				self.query.set(QueryInput { text, anchor_id }, now);
			},
			(None, None) => {},
		}

		if let Some(weight) = hybrid_weight
			&& weight.is_finite()
		{
			self.hybrid_weight.set(weight, now);
		}
		if let Some(distance) = max_distance
			&& distance.is_finite()
		{
			self.max_distance.set(distance, now);
		}
		if let Some(filters) = filters {
			self.filters = filters;
		}
		if let Some(mode) = mode {
			self.mode = mode;
		}
		if let Some(strategy) = max_distance_strategy {
			self.max_distance_strategy = strategy;
		}
		if let Some(category) = category {
			self.category = category;
		}
	}

	/// Sets query and anchor without waiting for the debounce.
	pub fn commit_query(&mut self, text: String, anchor_id: Option<String>) {
		self.query.force(QueryInput { text, anchor_id });
	}

	/// Overwrites both copies of the hybrid weight, cancelling a pending manual edit.
	pub fn override_hybrid_weight(&mut self, weight: f32) {
		self.hybrid_weight.force(weight);
	}

	/// Settles whatever is due. Returns whether the settled query text changed.
	pub fn poll(&mut self, now: Instant) -> bool {
		let before = self.query.settled().text.clone();

		self.query.poll(now);
		self.hybrid_weight.poll(now);
		self.max_distance.poll(now);

		self.query.settled().text != before
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		[self.query.deadline(), self.hybrid_weight.deadline(), self.max_distance.deadline()]
			.into_iter()
			.flatten()
			.min()
	}

	pub fn live(&self) -> SearchParameters {
		self.snapshot(self.query.live(), *self.hybrid_weight.live(), *self.max_distance.live())
	}

	pub fn settled(&self) -> SearchParameters {
		self.snapshot(
			self.query.settled(),
			*self.hybrid_weight.settled(),
			*self.max_distance.settled(),
		)
	}

	fn snapshot(
		&self,
		query: &QueryInput,
		hybrid_weight: f32,
		max_distance: f32,
	) -> SearchParameters {
		SearchParameters {
			query: query.text.clone(),
			filters: self.filters.clone(),
			mode: self.mode,
			hybrid_weight,
			max_distance,
			max_distance_strategy: self.max_distance_strategy,
			category: self.category.clone(),
			anchor_id: query.anchor_id.clone(),
		}
	}
}
