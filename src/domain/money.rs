//! Decimal amounts accepted either as JSON strings or JSON numbers.
//!
//! Numbers are read from their literal text (serde_json is built with
//! `arbitrary_precision`), so `10.1` stays `10.1` instead of passing
//! through an `f64`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => BigDecimal::from_str(text.trim())
            .map_err(|_| de::Error::custom(format!("invalid decimal amount: {text:?}"))),
        Value::Number(number) => BigDecimal::from_str(&number.to_string())
            .map_err(|_| de::Error::custom(format!("invalid decimal amount: {number}"))),
        other => Err(de::Error::custom(format!(
            "expected a decimal amount, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Amount {
        #[serde(deserialize_with = "deserialize")]
        value: BigDecimal,
    }

    fn parse(json: &str) -> Result<BigDecimal, serde_json::Error> {
        serde_json::from_str::<Amount>(json).map(|amount| amount.value)
    }

    #[test]
    fn fractional_numbers_keep_their_literal_digits() {
        assert_eq!(parse(r#"{"value": 10.1}"#).unwrap().to_string(), "10.1");
        assert_eq!(parse(r#"{"value": 0.3}"#).unwrap().to_string(), "0.3");
        assert_eq!(
            parse(r#"{"value": 12345678901234567.89}"#).unwrap().to_string(),
            "12345678901234567.89"
        );
    }

    #[test]
    fn strings_and_integers_are_accepted() {
        assert_eq!(parse(r#"{"value": " 27.50 "}"#).unwrap().to_string(), "27.50");
        assert_eq!(parse(r#"{"value": 5}"#).unwrap(), BigDecimal::from(5));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(parse(r#"{"value": "ten"}"#).is_err());
        assert!(parse(r#"{"value": true}"#).is_err());
        assert!(parse(r#"{"value": null}"#).is_err());
    }
}
