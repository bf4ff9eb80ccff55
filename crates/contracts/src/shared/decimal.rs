//! Decimal fields arrive either as JSON numbers or as numeric strings
//! (`"24999.00"`). These helpers accept both.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn to_f64<E: serde::de::Error>(raw: NumberOrString) -> Result<f64, E> {
    match raw {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid decimal: {s:?}"))),
    }
}

pub fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    to_f64(NumberOrString::deserialize(deserializer)?)
}

pub fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(raw) => to_f64(raw).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Price {
        #[serde(deserialize_with = "de_decimal")]
        value: f64,
        #[serde(default, deserialize_with = "de_opt_decimal")]
        extra: Option<f64>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Price = serde_json::from_str(r#"{"value": "24999.50"}"#).unwrap();
        assert_eq!(p.value, 24999.5);
        assert_eq!(p.extra, None);

        let p: Price = serde_json::from_str(r#"{"value": 12, "extra": "3.5"}"#).unwrap();
        assert_eq!(p.value, 12.0);
        assert_eq!(p.extra, Some(3.5));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Price>(r#"{"value": "abc"}"#).is_err());
    }
}
