pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown backend mode {value:?}; expected legacy or cursor.")]
	UnknownBackendMode { value: String },
	#[error("Unknown max distance strategy {value:?}; expected max_distance, min_score, or both.")]
	UnknownDistanceStrategy { value: String },
}
