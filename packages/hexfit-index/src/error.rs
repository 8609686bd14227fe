pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Item is not remote and has no usable latitude/longitude or h3_index.")]
	InvalidLocation,
	#[error("Resolution {resolution} is outside the range 0-15.")]
	InvalidResolution { resolution: u8 },
	#[error("Grid operation failed: {message}")]
	IndexOperation { message: String },
}
