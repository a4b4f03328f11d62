use crate::core::coerce::RawNumber;
use crate::core::percentage;
use crate::domain::model::PriceCollection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CodecError, Result};
use crate::utils::validation::{is_valid_currency_id, PropertyPath, ViolationKind, ViolationList};
use serde_json::{json, Map, Value};

pub const MISSING_FIELD: &str = "This field is missing.";
pub const BLANK_VALUE: &str = "This value should not be blank.";
pub const NOT_NUMERIC: &str = "This value should be of type numeric.";
pub const NOT_BOOLEAN: &str = "This value should be of type boolean.";
pub const NOT_ARRAY: &str = "This value should be of type array.";
pub const NOT_UUID: &str = "This value is not a valid UUID.";
pub const NO_DEFAULT_PRICE: &str = "No price for default currency defined";
pub const NESTED_CURRENCY_MISMATCH: &str = "Nested price currency must match the price currency.";

/// Tri-state of an optional nested attribute: the storage format keeps an
/// explicit `null` apart from an absent key.
enum Slot<T> {
    Absent,
    Null,
    Present(T),
}

struct NestedPrice {
    net: f64,
    gross: f64,
    currency_id: String,
    linked: bool,
}

impl NestedPrice {
    fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert("net".to_string(), Value::from(self.net));
        body.insert("gross".to_string(), Value::from(self.gross));
        body.insert("currencyId".to_string(), Value::from(self.currency_id.clone()));
        body.insert("linked".to_string(), Value::Bool(self.linked));
        Value::Object(body)
    }
}

struct EncodedPrice {
    currency_id: String,
    body: Map<String, Value>,
}

/// Encodes an authoring payload. `Ok(None)` means the field is cleared.
pub fn encode_value<C: ConfigProvider + ?Sized>(config: &C, value: &Value) -> Result<Option<String>> {
    let root = PropertyPath::new(config.field_path(), config.path_style());

    let entries: Vec<(String, &Value)> = match value {
        Value::Null if config.allow_null() => {
            tracing::debug!("Null price payload, clearing field {}", root);
            return Ok(None);
        }
        Value::Null => Vec::new(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => {
            let mut violations = ViolationList::new();
            violations.add(&root, NOT_ARRAY, ViolationKind::MalformedEntry);
            return Err(CodecError::Violations(violations));
        }
    };

    encode_entries(config, &root, entries).map(Some)
}

/// Encodes a typed collection through the same validation as untyped input.
pub fn encode_collection<C: ConfigProvider + ?Sized>(
    config: &C,
    collection: &PriceCollection,
) -> Result<String> {
    let root = PropertyPath::new(config.field_path(), config.path_style());
    let values = collection
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<Value>, _>>()?;

    let entries = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect();

    encode_entries(config, &root, entries)
}

fn encode_entries<C: ConfigProvider + ?Sized>(
    config: &C,
    root: &PropertyPath,
    entries: Vec<(String, &Value)>,
) -> Result<String> {
    let mut violations = ViolationList::new();
    let mut output = Map::new();
    let mut has_default = false;

    for (key, entry) in entries {
        let path = root.child(&key);
        let Some(encoded) = encode_entry(config, entry, &path, &mut violations) else {
            continue;
        };

        let storage_key = format!("{}{}", config.key_prefix(), encoded.currency_id);
        if output.contains_key(&storage_key) {
            violations.add(
                &path.child("currencyId"),
                format!("Duplicate price for currency {}.", encoded.currency_id),
                ViolationKind::DuplicateCurrency,
            );
            continue;
        }

        if encoded.currency_id == config.default_currency() {
            has_default = true;
        }
        tracing::debug!("Encoded price {} for currency {}", path, encoded.currency_id);
        output.insert(storage_key, Value::Object(encoded.body));
    }

    if !has_default {
        violations.add(root, NO_DEFAULT_PRICE, ViolationKind::MissingDefaultCurrency);
    }

    if !violations.is_empty() {
        tracing::debug!("Rejecting price write with {} violation(s)", violations.len());
    }
    violations.into_result()?;

    Ok(serde_json::to_string(&Value::Object(output))?)
}

fn encode_entry<C: ConfigProvider + ?Sized>(
    config: &C,
    entry: &Value,
    path: &PropertyPath,
    violations: &mut ViolationList,
) -> Option<EncodedPrice> {
    let Some(fields) = entry.as_object() else {
        violations.add(path, NOT_ARRAY, ViolationKind::MalformedEntry);
        return None;
    };

    let before = violations.len();
    let net = required_number(fields, "net", path, violations);
    let gross = required_number(fields, "gross", path, violations);
    let currency_id = required_currency_id(fields, path, violations);
    let linked = optional_bool(fields, "linked", path, violations);
    let list_price = nested_price(fields, "listPrice", currency_id.as_deref(), path, violations);
    let regulation_price =
        nested_price(fields, "regulationPrice", currency_id.as_deref(), path, violations);

    if violations.len() > before {
        return None;
    }
    let (net, gross, currency_id) = (net?, gross?, currency_id?);

    let mut body = Map::new();
    body.insert("net".to_string(), Value::from(net));
    body.insert("gross".to_string(), Value::from(gross));
    body.insert("currencyId".to_string(), Value::from(currency_id.clone()));
    body.insert("linked".to_string(), Value::Bool(linked));

    insert_slot(&mut body, "listPrice", &list_price);
    insert_slot(&mut body, "regulationPrice", &regulation_price);

    // 百分比一律重新計算，不信任輸入值
    if let Slot::Present(list) = &list_price {
        let percentage = percentage::calculate(
            net,
            gross,
            list.net,
            list.gross,
            config.percentage_precision(),
        );
        let value = match percentage {
            Some(p) => json!({ "net": p.net, "gross": p.gross }),
            None => Value::Null,
        };
        body.insert("percentage".to_string(), value);
    }

    Some(EncodedPrice { currency_id, body })
}

fn insert_slot(body: &mut Map<String, Value>, key: &str, slot: &Slot<NestedPrice>) {
    match slot {
        Slot::Absent => {}
        Slot::Null => {
            body.insert(key.to_string(), Value::Null);
        }
        Slot::Present(price) => {
            body.insert(key.to_string(), price.to_value());
        }
    }
}

fn nested_price(
    fields: &Map<String, Value>,
    key: &str,
    parent_currency: Option<&str>,
    path: &PropertyPath,
    violations: &mut ViolationList,
) -> Slot<NestedPrice> {
    let nested = match fields.get(key) {
        None => return Slot::Absent,
        Some(Value::Null) => return Slot::Null,
        Some(Value::Object(nested)) => nested,
        Some(_) => {
            violations.add(&path.child(key), NOT_ARRAY, ViolationKind::MalformedEntry);
            return Slot::Absent;
        }
    };

    let nested_path = path.child(key);
    let before = violations.len();
    let net = required_number(nested, "net", &nested_path, violations);
    let gross = required_number(nested, "gross", &nested_path, violations);
    let linked = optional_bool(nested, "linked", &nested_path, violations);

    let currency_id = match nested.get("currencyId") {
        None => parent_currency.map(str::to_string),
        Some(_) => {
            let currency_id = required_currency_id(nested, &nested_path, violations);
            if let (Some(own), Some(parent)) = (currency_id.as_deref(), parent_currency) {
                if own != parent {
                    violations.add(
                        &nested_path.child("currencyId"),
                        NESTED_CURRENCY_MISMATCH,
                        ViolationKind::InvalidValue,
                    );
                }
            }
            currency_id
        }
    };

    if violations.len() > before {
        return Slot::Absent;
    }

    match (net, gross, currency_id) {
        (Some(net), Some(gross), Some(currency_id)) => Slot::Present(NestedPrice {
            net,
            gross,
            currency_id,
            linked,
        }),
        // 上層 currencyId 無效時已記錄違規
        _ => Slot::Absent,
    }
}

fn required_number(
    fields: &Map<String, Value>,
    attr: &str,
    path: &PropertyPath,
    violations: &mut ViolationList,
) -> Option<f64> {
    let Some(value) = fields.get(attr) else {
        violations.add(&path.child(attr), MISSING_FIELD, ViolationKind::MissingRequiredField);
        return None;
    };

    let raw = RawNumber::from_value(value);
    if raw == RawNumber::Blank {
        violations.add(&path.child(attr), BLANK_VALUE, ViolationKind::MissingRequiredField);
        return None;
    }

    let number = raw.to_f64();
    if number.is_none() {
        violations.add(&path.child(attr), NOT_NUMERIC, ViolationKind::InvalidValue);
    }
    number
}

fn required_currency_id(
    fields: &Map<String, Value>,
    path: &PropertyPath,
    violations: &mut ViolationList,
) -> Option<String> {
    let attr_path = path.child("currencyId");
    match fields.get("currencyId") {
        None => {
            violations.add(&attr_path, MISSING_FIELD, ViolationKind::MissingRequiredField);
            None
        }
        Some(Value::Null) => {
            violations.add(&attr_path, BLANK_VALUE, ViolationKind::MissingRequiredField);
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            violations.add(&attr_path, BLANK_VALUE, ViolationKind::MissingRequiredField);
            None
        }
        Some(Value::String(s)) if is_valid_currency_id(s) => Some(s.clone()),
        Some(_) => {
            violations.add(&attr_path, NOT_UUID, ViolationKind::InvalidValue);
            None
        }
    }
}

fn optional_bool(
    fields: &Map<String, Value>,
    attr: &str,
    path: &PropertyPath,
    violations: &mut ViolationList,
) -> bool {
    match fields.get(attr) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            violations.add(&path.child(attr), NOT_BOOLEAN, ViolationKind::InvalidValue);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::domain::model::{Price, DEFAULT_CURRENCY};

    const USD: &str = "a27e053a364e428fa0f5e4d208bbecc7";

    fn config() -> CodecConfig {
        CodecConfig::default().with_field_path("/test")
    }

    fn violations_of(value: Value) -> ViolationList {
        let err = encode_value(&config(), &value).unwrap_err();
        err.violations().cloned().expect("validation error")
    }

    #[test]
    fn test_missing_net_reports_field_path() {
        let list = violations_of(json!({
            DEFAULT_CURRENCY: {"gross": "5", "currencyId": DEFAULT_CURRENCY, "linked": true}
        }));

        assert_eq!(list.len(), 2);
        let missing = list.get(0).unwrap();
        assert_eq!(missing.property_path, format!("/test/{}/net", DEFAULT_CURRENCY));
        assert_eq!(missing.message, MISSING_FIELD);
        assert_eq!(missing.kind, ViolationKind::MissingRequiredField);
        // 預設幣別的價格無效，因此也算缺少預設價格
        assert_eq!(list.get(1).unwrap().message, NO_DEFAULT_PRICE);
    }

    #[test]
    fn test_violations_are_collected_across_entries() {
        let list = violations_of(json!([
            {"net": "abc", "gross": true, "currencyId": DEFAULT_CURRENCY, "linked": "yes"},
            {"net": 1, "gross": 1, "currencyId": "EUR", "linked": true},
        ]));

        let paths: Vec<&str> = list.iter().map(|v| v.property_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/test/0/net", "/test/0/gross", "/test/0/linked", "/test/1/currencyId", "/test"]
        );
        assert_eq!(list.get(0).unwrap().message, NOT_NUMERIC);
        assert_eq!(list.get(2).unwrap().message, NOT_BOOLEAN);
        assert_eq!(list.get(3).unwrap().message, NOT_UUID);
    }

    #[test]
    fn test_blank_values() {
        let list = violations_of(json!([
            {"net": "", "gross": null, "currencyId": "", "linked": true},
        ]));
        assert!(list.iter().take(3).all(|v| v.message == BLANK_VALUE));
    }

    #[test]
    fn test_duplicate_currency() {
        let list = violations_of(json!([
            {"net": 1, "gross": 1, "currencyId": DEFAULT_CURRENCY, "linked": true},
            {"net": 2, "gross": 2, "currencyId": DEFAULT_CURRENCY, "linked": true},
        ]));
        assert_eq!(list.len(), 1);
        let duplicate = list.get(0).unwrap();
        assert_eq!(duplicate.kind, ViolationKind::DuplicateCurrency);
        assert_eq!(duplicate.property_path, "/test/1/currencyId");
    }

    #[test]
    fn test_nested_list_price_violations() {
        let list = violations_of(json!({
            DEFAULT_CURRENCY: {
                "net": 5, "gross": 5, "currencyId": DEFAULT_CURRENCY, "linked": true,
                "listPrice": {"gross": 10, "currencyId": USD}
            }
        }));

        let paths: Vec<&str> = list.iter().map(|v| v.property_path.as_str()).collect();
        let prefix = format!("/test/{}/listPrice", DEFAULT_CURRENCY);
        assert_eq!(
            paths,
            vec![
                format!("{}/net", prefix).as_str(),
                format!("{}/currencyId", prefix).as_str(),
                "/test"
            ]
        );
        assert_eq!(list.get(1).unwrap().message, NESTED_CURRENCY_MISMATCH);
    }

    #[test]
    fn test_nested_currency_is_inherited() {
        let data = encode_value(
            &config(),
            &json!([{
                "net": 5, "gross": 5, "currencyId": DEFAULT_CURRENCY, "linked": true,
                "regulationPrice": {"net": 7, "gross": 8}
            }]),
        )
        .unwrap()
        .unwrap();

        let stored: Value = serde_json::from_str(&data).unwrap();
        let key = format!("c{}", DEFAULT_CURRENCY);
        assert_eq!(stored[&key]["regulationPrice"]["currencyId"], json!(DEFAULT_CURRENCY));
        assert_eq!(stored[&key]["regulationPrice"]["linked"], json!(false));
    }

    #[test]
    fn test_scalar_payload_is_malformed() {
        let list = violations_of(json!("foo"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().kind, ViolationKind::MalformedEntry);
        assert_eq!(list.get(0).unwrap().property_path, "/test");
    }

    #[test]
    fn test_null_payload() {
        assert!(encode_value(&config(), &Value::Null).is_err());

        let mut nullable = config();
        nullable.allow_null = true;
        assert_eq!(encode_value(&nullable, &Value::Null).unwrap(), None);
    }

    #[test]
    fn test_custom_prefix_and_default_currency() {
        let mut custom = config().with_default_currency(USD);
        custom.key_prefix = "cur_".to_string();

        let mut collection = PriceCollection::new();
        collection.add(Price::new(USD, 1.5, 2.0, false));

        let data = encode_collection(&custom, &collection).unwrap();
        assert_eq!(
            data,
            format!(
                r#"{{"cur_{USD}":{{"net":1.5,"gross":2.0,"currencyId":"{USD}","linked":false,"listPrice":null,"regulationPrice":null}}}}"#
            )
        );
    }
}
