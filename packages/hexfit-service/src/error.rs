pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Index error: {0}")]
	Index(#[from] hexfit_index::Error),
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
