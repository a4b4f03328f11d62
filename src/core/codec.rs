use crate::config::CodecConfig;
use crate::core::{decoder, encoder};
use crate::domain::model::PriceCollection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CodecError, Result};
use serde_json::Value;

/// Converts a price field between its write payload and the JSON stored
/// in the column. Holds no state besides its settings, so one instance can
/// be shared across threads.
pub struct PriceFieldCodec<C: ConfigProvider = CodecConfig> {
    config: C,
}

impl<C: ConfigProvider> PriceFieldCodec<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Validates and encodes an untyped payload (an object keyed by
    /// currency, or a list of entries).
    pub fn encode(&self, value: &Value) -> Result<Option<String>> {
        encoder::encode_value(&self.config, value)
    }

    /// Parses raw JSON bytes and encodes them. Unparseable input is a
    /// payload error, not corrupted stored data.
    pub fn encode_json(&self, input: &[u8]) -> Result<Option<String>> {
        let payload: Value =
            serde_json::from_slice(input).map_err(|e| CodecError::InvalidPayload {
                message: e.to_string(),
            })?;
        self.encode(&payload)
    }

    pub fn encode_collection(&self, collection: &PriceCollection) -> Result<String> {
        encoder::encode_collection(&self.config, collection)
    }

    pub fn decode(&self, stored: &str) -> Result<Option<PriceCollection>> {
        decoder::decode_str(&self.config, stored)
    }

    pub fn decode_value(&self, stored: &Value) -> Result<Option<PriceCollection>> {
        decoder::decode_value(&self.config, stored)
    }
}

impl Default for PriceFieldCodec<CodecConfig> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}
