//! Token codec: JSON, then zlib, then base64.
//!
//! The result is plain ASCII that survives a URL fragment or a chat paste.
//! Compression only keeps tokens short; it is not an integrity check.

mod compress;

pub use compress::{Compressor, FnCompressor, Zlib};

use crate::error::{DecodeError, EncodeError};
use crate::models::{ResultsData, SessionData};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};

/// Encodes and decodes tokens with an injected compressor.
#[derive(Debug, Clone, Default)]
pub struct Codec<C = Zlib> {
    compressor: C,
}

impl<C: Compressor> Codec<C> {
    pub fn new(compressor: C) -> Self {
        Self { compressor }
    }

    pub fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError> {
        let json = serde_json::to_vec(value)?;
        let compressed = self
            .compressor
            .compress(&json)
            .map_err(EncodeError::Compress)?;
        let token = STANDARD.encode(compressed);
        debug!("Encoded {} bytes of JSON into a {} byte token", json.len(), token.len());
        Ok(token)
    }

    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, DecodeError> {
        let compressed = STANDARD.decode(token.trim())?;
        let bytes = self
            .compressor
            .decompress(&compressed)
            .map_err(DecodeError::Decompress)?;
        let text = String::from_utf8(bytes)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn encode_session(&self, session: &SessionData) -> Result<String, EncodeError> {
        self.encode(session)
    }

    pub fn decode_session(&self, token: &str) -> Result<SessionData, DecodeError> {
        let session: SessionData = self.decode(token)?;
        if session.votes_per_person == 0 {
            return Err(DecodeError::Invalid(
                "votesPerPerson must be positive".to_string(),
            ));
        }
        Ok(session)
    }

    pub fn encode_results(&self, results: &ResultsData) -> Result<String, EncodeError> {
        self.encode(results)
    }

    pub fn decode_results(&self, token: &str) -> Result<ResultsData, DecodeError> {
        self.decode(token)
    }
}
