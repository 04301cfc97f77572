//! Session engine for incremental search: debounced parameters, sequential page fetches, stale
//! response suppression, and the find-similar entry point.

pub mod controller;
pub mod orchestrator;
pub mod similar;
pub mod store;

mod error;

pub use controller::{SessionController, SessionSnapshot};
pub use error::{Error, Result};
pub use orchestrator::{FetchOrchestrator, FetchOutcome};
pub use similar::resolve_description;
pub use store::{Debounced, ParameterStore};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use reqwest::Client;

use sift_config::{Backend, Config};
use sift_domain::{PagingPolicy, ResultItem, SearchPage, SearchParameters, SearchRequest};
use sift_providers::{lookup, phrases, search};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, request: &'a SearchRequest) -> BoxFuture<'a, Result<SearchPage>>;
}

pub trait ItemLookup
where
	Self: Send + Sync,
{
	fn lookup_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ResultItem>>;
}

pub trait KeywordPhraseSource
where
	Self: Send + Sync,
{
	fn keyword_phrases<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub search: Arc<dyn SearchBackend>,
	pub lookup: Arc<dyn ItemLookup>,
	pub phrases: Arc<dyn KeywordPhraseSource>,
}
impl Providers {
	pub fn new(
		search: Arc<dyn SearchBackend>,
		lookup: Arc<dyn ItemLookup>,
		phrases: Arc<dyn KeywordPhraseSource>,
	) -> Self {
		Self { search, lookup, phrases }
	}

	/// All three collaborators backed by one HTTP client against `cfg.api_base`.
	pub fn http(cfg: &Backend) -> Result<Self> {
		let provider = Arc::new(HttpProviders::new(cfg)?);

		Ok(Self { search: provider.clone(), lookup: provider.clone(), phrases: provider })
	}
}

pub struct HttpProviders {
	client: Client,
	cfg: Backend,
}
impl HttpProviders {
	pub fn new(cfg: &Backend) -> Result<Self> {
		Ok(Self { client: sift_providers::client(cfg)?, cfg: cfg.clone() })
	}
}
impl SearchBackend for HttpProviders {
	fn search<'a>(&'a self, request: &'a SearchRequest) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(async move { Ok(search::search(&self.client, &self.cfg, request).await?) })
	}
}
impl ItemLookup for HttpProviders {
	fn lookup_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ResultItem>> {
		Box::pin(async move { Ok(lookup::lookup_by_id(&self.client, &self.cfg, id).await?) })
	}
}
impl KeywordPhraseSource for HttpProviders {
	fn keyword_phrases<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move { Ok(phrases::keyword_phrases(&self.client, &self.cfg).await?) })
	}
}

/// Timing, paging and starting parameters for one search session.
#[derive(Clone, Debug)]
pub struct SessionSettings {
	pub paging: PagingPolicy,
	pub auto_continue_delay: Duration,
	pub request_timeout: Duration,
	pub query_debounce: Duration,
	pub hybrid_weight_debounce: Duration,
	pub max_distance_debounce: Duration,
	pub wildcard: String,
	pub description_field: String,
	pub initial: SearchParameters,
}
impl SessionSettings {
	pub fn from_config(cfg: &Config) -> Result<Self> {
		let initial = SearchParameters {
			mode: cfg.search.mode.parse()?,
			hybrid_weight: cfg.search.hybrid_weight,
			max_distance: cfg.search.max_distance,
			max_distance_strategy: cfg.search.max_distance_strategy.parse()?,
			..Default::default()
		};

		Ok(Self {
			paging: PagingPolicy {
				page_size: cfg.paging.page_size,
				min_results: cfg.paging.min_results,
			},
			auto_continue_delay: Duration::from_millis(cfg.paging.auto_continue_delay_ms),
			request_timeout: Duration::from_millis(cfg.backend.timeout_ms),
			query_debounce: Duration::from_millis(cfg.debounce.query_ms),
			hybrid_weight_debounce: Duration::from_millis(cfg.debounce.hybrid_weight_ms),
			max_distance_debounce: Duration::from_millis(cfg.debounce.max_distance_ms),
			wildcard: cfg.search.wildcard.clone(),
			description_field: cfg.similar.description_field.clone(),
			initial,
		})
	}
}
impl Default for SessionSettings {
	fn default() -> Self {
		Self {
			paging: PagingPolicy::default(),
			auto_continue_delay: Duration::from_millis(100),
			request_timeout: Duration::from_secs(60),
			query_debounce: Duration::from_millis(500),
			hybrid_weight_debounce: Duration::from_millis(300),
			max_distance_debounce: Duration::from_millis(300),
			wildcard: "*".to_string(),
			description_field: "description".to_string(),
			initial: SearchParameters {
				hybrid_weight: sift_domain::BALANCED_HYBRID_WEIGHT,
				max_distance: 1.0,
				..Default::default()
			},
		}
	}
}
