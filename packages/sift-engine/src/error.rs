pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search backend error: {message}")]
	Backend { message: String },

	#[error("Search request timed out after {after_ms} ms.")]
	Timeout { after_ms: u64 },

	#[error("Item lookup failed: {message}")]
	Lookup { message: String },

	#[error("Item {id} has no description to search with.")]
	MissingDescription { id: String },

	#[error("Search session is closed.")]
	SessionClosed,

	#[error(transparent)]
	Domain(#[from] sift_domain::Error),

	#[error(transparent)]
	Provider(#[from] sift_providers::Error),
}
