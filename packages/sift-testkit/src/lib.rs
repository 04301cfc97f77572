//! In-memory collaborators for driving a search session in tests.

use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use tokio::time;

use sift_domain::{BackendMode, ResultItem, SearchPage, SearchRequest};
use sift_engine::{
	BoxFuture, Error, ItemLookup, KeywordPhraseSource, Providers, Result, SearchBackend,
};

/// Result items `{prefix}0..{prefix}{count}` carrying a `description` payload field.
pub fn items(prefix: &str, count: usize) -> Vec<ResultItem> {
	(0..count).map(|i| item(&format!("{prefix}{i}"))).collect()
}

pub fn item(id: &str) -> ResultItem {
	ResultItem::new(
		id,
		1.0,
		serde_json::json!({ "id": id, "description": format!("About {id}.") }),
	)
}

/// Providers around `backend`, an empty lookup, and a fixed phrase list.
pub fn scripted_providers(backend: ScriptedBackend, phrases: &[&str]) -> (Providers, RequestLog) {
	let log = backend.log();
	let providers = Providers::new(
		Arc::new(backend),
		Arc::new(StaticLookup::new(Vec::new())),
		Arc::new(StaticPhrases::new(phrases)),
	);

	(providers, log)
}

/// What a scripted backend answers with, optionally after a delay.
#[derive(Clone, Debug)]
pub struct Reply {
	outcome: std::result::Result<SearchPage, String>,
	delay: Duration,
}
impl Reply {
	pub fn page(page: SearchPage) -> Self {
		Self { outcome: Ok(page), delay: Duration::ZERO }
	}

	pub fn items(items: Vec<ResultItem>) -> Self {
		Self::page(SearchPage::with_results(items))
	}

	pub fn empty() -> Self {
		Self::page(SearchPage::default())
	}

	pub fn failure(message: impl Into<String>) -> Self {
		Self { outcome: Err(message.into()), delay: Duration::ZERO }
	}

	pub fn after(mut self, delay: Duration) -> Self {
		self.delay = delay;

		self
	}
}

/// Every request a scripted backend received, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RequestLog(Arc<Mutex<Vec<SearchRequest>>>);
impl RequestLog {
	pub fn all(&self) -> Vec<SearchRequest> {
		self.0.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn len(&self) -> usize {
		self.0.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn last(&self) -> Option<SearchRequest> {
		self.0.lock().unwrap_or_else(|err| err.into_inner()).last().cloned()
	}

	pub fn queries(&self) -> Vec<String> {
		self.all().into_iter().map(|request| request.query).collect()
	}

	fn push(&self, request: SearchRequest) {
		self.0.lock().unwrap_or_else(|err| err.into_inner()).push(request);
	}
}

type Responder = Box<dyn Fn(&SearchRequest) -> Reply + Send + Sync>;

/// A search backend that answers from a closure and records what it was asked.
pub struct ScriptedBackend {
	respond: Responder,
	log: RequestLog,
}
impl ScriptedBackend {
	pub fn new<F>(respond: F) -> Self
	where
		F: Fn(&SearchRequest) -> Reply + Send + Sync + 'static,
	{
		Self { respond: Box::new(respond), log: RequestLog::default() }
	}

	/// A backend over a fixed id list that honors exclusions and cursors the way a well-behaved
	/// server would. Legacy pages skip excluded ids; cursor pages resume at `cursor_offset`.
	pub fn corpus(ids: &[&str]) -> Self {
		let corpus: Vec<String> = ids.iter().map(|id| id.to_string()).collect();

		Self::new(move |request| {
			let excluded: HashSet<&str> =
				request.exclude_ids.iter().flatten().map(String::as_str).collect();
			let offset = request.cursor_offset.as_ref().and_then(|offset| offset.as_u64());
			let start = match request.mode {
				BackendMode::Cursor => offset.unwrap_or(0) as usize,
				BackendMode::Legacy => 0,
			};
			let mut results = Vec::new();
			let mut consumed = start;

			for id in corpus.iter().skip(start) {
				if results.len() == request.page_size as usize {
					break;
				}

				consumed += 1;

				if !excluded.contains(id.as_str()) {
					results.push(item(id));
				}
			}

			let next_offset = match request.mode {
				BackendMode::Cursor => Some(serde_json::json!(consumed)),
				BackendMode::Legacy => None,
			};

			Reply::page(SearchPage {
				results,
				num_hits_estimate: Some(corpus.len() as u64),
				seen_ids: None,
				next_offset,
			})
		})
	}

	pub fn log(&self) -> RequestLog {
		self.log.clone()
	}
}
impl SearchBackend for ScriptedBackend {
	fn search<'a>(&'a self, request: &'a SearchRequest) -> BoxFuture<'a, Result<SearchPage>> {
		self.log.push(request.clone());

		let Reply { outcome, delay } = (self.respond)(request);

		Box::pin(async move {
			if !delay.is_zero() {
				time::sleep(delay).await;
			}

			outcome.map_err(|message| Error::Backend { message })
		})
	}
}

/// Item lookup over a fixed map. Unknown ids fail.
pub struct StaticLookup {
	items: HashMap<String, ResultItem>,
	calls: Arc<AtomicUsize>,
}
impl StaticLookup {
	pub fn new(items: Vec<ResultItem>) -> Self {
		Self {
			items: items.into_iter().map(|item| (item.id.clone(), item)).collect(),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn calls(&self) -> Arc<AtomicUsize> {
		self.calls.clone()
	}
}
impl ItemLookup for StaticLookup {
	fn lookup_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ResultItem>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let found = self
			.items
			.get(id)
			.cloned()
			.ok_or_else(|| Error::Lookup { message: format!("Item {id} not found.") });

		Box::pin(async move { found })
	}
}

/// Keyword phrase source with a fixed answer.
pub struct StaticPhrases {
	phrases: Option<Vec<String>>,
}
impl StaticPhrases {
	pub fn new(phrases: &[&str]) -> Self {
		Self { phrases: Some(phrases.iter().map(|phrase| phrase.to_string()).collect()) }
	}

	pub fn failing() -> Self {
		Self { phrases: None }
	}
}
impl KeywordPhraseSource for StaticPhrases {
	fn keyword_phrases<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		let phrases = self
			.phrases
			.clone()
			.ok_or_else(|| Error::Backend { message: "Phrase list unavailable.".to_string() });

		Box::pin(async move { phrases })
	}
}
