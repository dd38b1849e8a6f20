use thiserror::Error;

/// Input the user can fix and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload at least one image and set a positive number of votes.")]
    EmptySession,

    #[error("You can only upload a maximum of {max} images.")]
    TooManyImages { max: usize },

    #[error("Please paste at least one vote code.")]
    NoVoteCodes,
}

/// A token that could not be turned back into a value. Each variant names
/// the stage that failed.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload failed to decompress: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("token payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token payload has the wrong structure: {0}")]
    Structure(#[from] serde_json::Error),

    #[error("token payload is incomplete: {0}")]
    Invalid(String),
}

/// Failures while producing a token.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to compress payload: {0}")]
    Compress(#[source] std::io::Error),
}

/// Image ingestion failures. Reported per batch.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("image worker stopped: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error(transparent)]
    NoCodes(#[from] ValidationError),

    #[error(
        "An error occurred while decoding the vote codes. Please ensure they are correct and unmodified."
    )]
    Decode {
        /// 1-based index of the first token that failed.
        position: usize,
        #[source]
        source: DecodeError,
    },
}

/// Everything the command line front end can report.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid or corrupted voting link.")]
    InvalidLink(#[source] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("There was an error processing the images. Some files might not be valid images.")]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
