use std::{sync::Arc, time::Duration};

use tokio::{
	sync::{mpsc, watch},
	time::{self, Instant},
};
use uuid::Uuid;

use crate::{
	Error, FetchOrchestrator, FetchOutcome, ItemLookup, KeywordPhraseSource, ParameterStore,
	Providers, Result, SessionSettings,
};
use sift_domain::{
	PaginationCursor, ParameterPatch, ResultItem, SearchPage, SearchParameters,
	derive_hybrid_weight,
};

/// Read-only view of a session for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
	/// Changes every time the result list is reset by new parameters.
	pub session_id: Uuid,
	pub results: Vec<ResultItem>,
	pub loading: bool,
	pub loading_more: bool,
	pub has_more: bool,
	pub total_hits_estimate: u64,
	pub backend_offline: bool,
	pub page: u32,
	/// Live parameters, including edits that have not settled yet.
	pub parameters: SearchParameters,
}

pub(crate) enum Command {
	Update(ParameterPatch),
	LoadMore,
	Retry,
	Similar { query: String, anchor_id: String },
}

/// Handle to a running search session.
///
/// The session itself runs as one task that owns every piece of mutable state, so commands,
/// debounce timers and fetch completions are handled one at a time. Dropping the last handle
/// stops the task.
#[derive(Clone)]
pub struct SessionController {
	commands: mpsc::UnboundedSender<Command>,
	snapshots: watch::Receiver<SessionSnapshot>,
	pub(crate) lookup: Arc<dyn ItemLookup>,
	pub(crate) description_field: String,
}
impl SessionController {
	/// Starts the session task. The keyword phrase list is fetched first, then page 1 of the
	/// initial parameters.
	pub fn spawn(providers: Providers, settings: SessionSettings) -> Self {
		let (commands_tx, commands_rx) = mpsc::unbounded_channel();
		let (completions_tx, completions_rx) = mpsc::unbounded_channel();
		let engine = Engine::new(&providers, &settings, completions_tx);
		let (snapshots_tx, snapshots_rx) = watch::channel(engine.snapshot());

		tokio::spawn(engine.run(commands_rx, completions_rx, snapshots_tx));

		Self {
			commands: commands_tx,
			snapshots: snapshots_rx,
			lookup: providers.lookup,
			description_field: settings.description_field,
		}
	}

	pub fn update_parameters(&self, patch: ParameterPatch) -> Result<()> {
		if patch.is_empty() {
			return Ok(());
		}

		self.send(Command::Update(patch))
	}

	/// Requests the next page. Ignored while a fetch is in flight or the stream is exhausted.
	pub fn load_more(&self) -> Result<()> {
		self.send(Command::LoadMore)
	}

	/// Re-issues page 1 for the current parameters. Visible results stay until replaced.
	pub fn retry(&self) -> Result<()> {
		self.send(Command::Retry)
	}

	pub fn snapshot(&self) -> SessionSnapshot {
		self.snapshots.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
		self.snapshots.clone()
	}

	pub(crate) fn send(&self, command: Command) -> Result<()> {
		self.commands.send(command).map_err(|_| Error::SessionClosed)
	}
}

#[derive(Clone, Debug)]
struct FetchAttempt {
	seq: u64,
	page: u32,
	parameters: SearchParameters,
}

struct Completion {
	attempt: FetchAttempt,
	result: Result<SearchPage>,
}

struct Engine {
	store: ParameterStore,
	cursor: PaginationCursor,
	orchestrator: FetchOrchestrator,
	phrases: Arc<dyn KeywordPhraseSource>,
	known_phrases: Vec<String>,
	wildcard: String,
	auto_continue_delay: Duration,
	completions: mpsc::UnboundedSender<Completion>,
	results: Vec<ResultItem>,
	session_id: Uuid,
	seq: u64,
	/// Parameters the running session was issued for.
	active: Option<SearchParameters>,
	in_flight: Option<FetchAttempt>,
	page_loaded: bool,
	loading: bool,
	loading_more: bool,
	backend_offline: bool,
	auto_continue_at: Option<Instant>,
}
impl Engine {
	fn new(
		providers: &Providers,
		settings: &SessionSettings,
		completions: mpsc::UnboundedSender<Completion>,
	) -> Self {
		Self {
			store: ParameterStore::new(
				settings.initial.clone(),
				settings.query_debounce,
				settings.hybrid_weight_debounce,
				settings.max_distance_debounce,
			),
			cursor: PaginationCursor::new(),
			orchestrator: FetchOrchestrator::new(
				providers.search.clone(),
				settings.paging,
				settings.request_timeout,
				settings.wildcard.clone(),
			),
			phrases: providers.phrases.clone(),
			known_phrases: Vec::new(),
			wildcard: settings.wildcard.clone(),
			auto_continue_delay: settings.auto_continue_delay,
			completions,
			results: Vec::new(),
			session_id: Uuid::new_v4(),
			seq: 0,
			active: None,
			in_flight: None,
			page_loaded: false,
			loading: false,
			loading_more: false,
			backend_offline: false,
			auto_continue_at: None,
		}
	}

	async fn run(
		mut self,
		mut commands: mpsc::UnboundedReceiver<Command>,
		mut completions: mpsc::UnboundedReceiver<Completion>,
		snapshots: watch::Sender<SessionSnapshot>,
	) {
		self.known_phrases = match self.phrases.keyword_phrases().await {
			Ok(phrases) => phrases,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to fetch keyword phrases. Using none.");

				Vec::new()
			},
		};

		tracing::debug!(count = self.known_phrases.len(), "Keyword phrases loaded.");

		self.sync_parameters();
		snapshots.send_replace(self.snapshot());

		loop {
			let deadline = self.next_deadline();
			let wake = deadline.unwrap_or_else(Instant::now);

			tokio::select! {
				command = commands.recv() => {
					let Some(command) = command else {
						break;
					};

					self.handle_command(command);
				},
				Some(completion) = completions.recv() => self.handle_completion(completion),
				_ = time::sleep_until(wake), if deadline.is_some() => self.handle_timers(),
			}

			snapshots.send_replace(self.snapshot());
		}

		tracing::debug!(session_id = %self.session_id, "Search session stopped.");
	}

	fn handle_command(&mut self, command: Command) {
		let now = Instant::now();

		match command {
			Command::Update(patch) => self.store.apply(patch, now),
			Command::LoadMore => self.load_more(),
			Command::Retry => self.retry(),
			Command::Similar { query, anchor_id } => {
				tracing::info!(anchor_id = %anchor_id, "Searching for similar items.");

				self.store.commit_query(query, Some(anchor_id));
				self.derive_hybrid_weight();
			},
		}

		self.settle(now);
		self.sync_parameters();
	}

	fn handle_timers(&mut self) {
		let now = Instant::now();

		self.settle(now);
		self.sync_parameters();

		if self.auto_continue_at.is_some_and(|at| at <= now) {
			self.auto_continue_at = None;

			tracing::debug!(page = self.cursor.page() + 1, "Auto-continuing sparse results.");

			self.load_more();
		}
	}

	fn handle_completion(&mut self, completion: Completion) {
		let Completion { attempt, result } = completion;
		let current = self.in_flight.as_ref().is_some_and(|in_flight| in_flight.seq == attempt.seq);

		if !current || self.active.as_ref() != Some(&attempt.parameters) {
			tracing::debug!(seq = attempt.seq, page = attempt.page, "Discarding superseded response.");

			return;
		}

		self.in_flight = None;
		self.loading = false;
		self.loading_more = false;

		let outcome = self.orchestrator.resolve(
			attempt.parameters.mode,
			attempt.page,
			result,
			&mut self.cursor,
			&mut self.results,
		);

		match outcome {
			FetchOutcome::Loaded { auto_continue, .. } => {
				self.backend_offline = false;
				self.page_loaded = true;

				if auto_continue && self.auto_continue_at.is_none() {
					self.auto_continue_at = Some(Instant::now() + self.auto_continue_delay);
				}
			},
			FetchOutcome::Failed { .. } => self.backend_offline = true,
		}
	}

	/// Settles due debounced inputs. A newly settled query re-derives the hybrid weight.
	fn settle(&mut self, now: Instant) {
		if self.store.poll(now) {
			self.derive_hybrid_weight();
		}
	}

	fn derive_hybrid_weight(&mut self) {
		let query = self.store.settled().query;
		let weight = derive_hybrid_weight(&query, &self.wildcard, &self.known_phrases);

		self.store.override_hybrid_weight(weight);
	}

	/// Starts a new session when the settled parameters differ from the running one.
	fn sync_parameters(&mut self) {
		let settled = self.store.settled();

		if self.active.as_ref() == Some(&settled) {
			return;
		}

		self.cursor.reset();
		self.results.clear();
		self.auto_continue_at = None;
		self.page_loaded = false;
		self.loading_more = false;
		self.session_id = Uuid::new_v4();

		tracing::info!(
			session_id = %self.session_id,
			query = %settled.query,
			mode = %settled.mode,
			"Starting search session."
		);

		self.issue(settled, 1);
	}

	fn load_more(&mut self) {
		if self.in_flight.is_some() || !self.page_loaded || !self.cursor.has_more() {
			return;
		}

		let Some(parameters) = self.active.clone() else {
			return;
		};

		self.cursor.advance();
		self.issue(parameters, self.cursor.page());
	}

	fn retry(&mut self) {
		let Some(parameters) = self.active.clone() else {
			return;
		};

		tracing::info!(session_id = %self.session_id, "Retrying first page.");

		self.cursor.reset();
		self.auto_continue_at = None;
		self.page_loaded = false;
		self.loading_more = false;
		self.issue(parameters, 1);
	}

	fn issue(&mut self, parameters: SearchParameters, page: u32) {
		self.seq += 1;

		let request = self.orchestrator.build_request(&parameters, page, &self.cursor);
		let attempt = FetchAttempt { seq: self.seq, page, parameters: parameters.clone() };

		if page <= 1 {
			self.loading = true;
		} else {
			self.loading_more = true;
		}

		self.active = Some(parameters);
		self.in_flight = Some(attempt.clone());

		let orchestrator = self.orchestrator.clone();
		let completions = self.completions.clone();

		tokio::spawn(async move {
			let result = orchestrator.execute(&request).await;
			let _ = completions.send(Completion { attempt, result });
		});
	}

	fn next_deadline(&self) -> Option<Instant> {
		match (self.store.next_deadline(), self.auto_continue_at) {
			(Some(a), Some(b)) => Some(a.min(b)),
			(a, b) => a.or(b),
		}
	}

	fn snapshot(&self) -> SessionSnapshot {
		SessionSnapshot {
			session_id: self.session_id,
			results: self.results.clone(),
			loading: self.loading,
			loading_more: self.loading_more,
			has_more: self.cursor.has_more(),
			total_hits_estimate: self.cursor.total_hits_estimate(),
			backend_offline: self.backend_offline,
			page: self.cursor.page(),
			parameters: self.store.live(),
		}
	}
}
