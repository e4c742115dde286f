//! Lenient deserializers for form posts, query strings and hand-edited
//! data files
//!
//! Admin forms and older data files disagree on whether prices, sizes and
//! room counts are numbers or strings. Both are accepted.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(String::from)
        .filter(|s| !s.trim().is_empty()))
}

/// A count such as bedrooms, sent as `3` or `"3"`; blank is `None`
pub fn opt_u32_or_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(value) => value,
    };

    match value {
        StringOrNumber::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u32>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a whole number, got '{}'", s)))
        }
        StringOrNumber::Int(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("count out of range: {}", n))),
        StringOrNumber::Float(n) if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 => {
            Ok(Some(n as u32))
        }
        StringOrNumber::Float(n) => Err(D::Error::custom(format!(
            "expected a whole number, got {}",
            n
        ))),
    }
}

/// Query-string flag: `true`/`false`, `1`/`0` or `yes`/`no`; blank is `None`
pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        other => Err(D::Error::custom(format!("expected a boolean flag, got '{}'", other))),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
