use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed image could not be opened or decoded
    #[error("could not decode seed image {source_name}: {source}")]
    ImageDecode {
        source_name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SeedError>;
