pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown command :{name}. Type :help for the list.")]
	UnknownCommand { name: String },

	#[error("Invalid argument for :{command}: {message}")]
	InvalidArgument { command: &'static str, message: String },

	#[error(transparent)]
	Domain(#[from] sift_domain::Error),
}
