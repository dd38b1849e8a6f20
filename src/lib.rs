//! Serverless image priority voting.
//!
//! An organizer packs a set of images and a vote budget into a link token,
//! each participant spends their budget and sends back a vote code, and the
//! organizer sums the codes into a ranking. Every piece of state lives in
//! those tokens.

pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod session;
pub mod voting;

pub use codec::{Codec, Compressor, FnCompressor, Zlib};
pub use error::{AggregateError, AppError, DecodeError, ProcessingError, ValidationError};
pub use models::{ImageFile, RankedImage, ResultsData, SessionData};
pub use voting::{Ballot, BallotState, aggregate, summarize};
