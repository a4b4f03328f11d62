use crate::core::coerce::deserialize_lenient_f64;
use crate::domain::model::{Percentage, Price, PriceCollection};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CodecError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Stored entry as written by any encode version. Everything past the
/// core attributes is optional on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPrice {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    net: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    gross: f64,
    currency_id: String,
    #[serde(default)]
    linked: Option<bool>,
    #[serde(default)]
    list_price: Option<Box<StoredPrice>>,
    #[serde(default)]
    regulation_price: Option<Box<StoredPrice>>,
    #[serde(default)]
    percentage: Option<StoredPercentage>,
}

#[derive(Debug, Deserialize)]
struct StoredPercentage {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    net: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    gross: f64,
}

impl From<StoredPrice> for Price {
    fn from(stored: StoredPrice) -> Self {
        Price {
            net: stored.net,
            gross: stored.gross,
            currency_id: stored.currency_id,
            linked: stored.linked.unwrap_or(false),
            list_price: stored.list_price.map(|p| Box::new(Price::from(*p))),
            regulation_price: stored.regulation_price.map(|p| Box::new(Price::from(*p))),
            percentage: stored.percentage.map(|p| Percentage {
                net: p.net,
                gross: p.gross,
            }),
        }
    }
}

pub fn decode_str<C: ConfigProvider + ?Sized>(
    config: &C,
    stored: &str,
) -> Result<Option<PriceCollection>> {
    let value: Value = serde_json::from_str(stored)
        .map_err(|e| CodecError::malformed(format!("invalid JSON: {}", e)))?;
    decode_value(config, &value)
}

pub fn decode_value<C: ConfigProvider + ?Sized>(
    config: &C,
    value: &Value,
) -> Result<Option<PriceCollection>> {
    let entries = match value {
        Value::Null => return Ok(None),
        Value::Object(entries) => entries,
        other => {
            return Err(CodecError::malformed(format!(
                "expected an object keyed by currency, found {}",
                json_type(other)
            )))
        }
    };

    let mut collection = PriceCollection::new();
    for (key, entry) in entries {
        let stored: StoredPrice = serde_json::from_value(entry.clone())
            .map_err(|e| CodecError::malformed(format!("entry '{}': {}", key, e)))?;

        match key.strip_prefix(config.key_prefix()) {
            Some(currency_id) if currency_id == stored.currency_id => {}
            _ => tracing::warn!(
                "⚠️ Storage key '{}' does not match currency {}, using the entry's currencyId",
                key,
                stored.currency_id
            ),
        }

        if collection.contains(&stored.currency_id) {
            tracing::warn!("⚠️ Duplicate stored price for currency {}", stored.currency_id);
        }
        collection.add(Price::from(stored));
    }

    tracing::debug!("Decoded {} price(s)", collection.len());
    Ok(Some(collection))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
