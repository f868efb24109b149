//! Serde helpers for the JSON wire format.
//!
//! Yes/no flags are `bool` inside the crate and travel as `"Y"` / `"N"`.
//! Input is matched case-insensitively; output is always upper case.

use serde::{Deserialize, Deserializer};

pub const YES: &str = "Y";
pub const NO: &str = "N";

/// Parse a yes/no token.
pub fn parse_flag(token: &str) -> Option<bool> {
    let token = token.trim();
    if token.eq_ignore_ascii_case(YES) {
        Some(true)
    } else if token.eq_ignore_ascii_case(NO) {
        Some(false)
    } else {
        None
    }
}

/// Wire token for a flag value.
pub fn flag_token(value: bool) -> &'static str {
    if value { YES } else { NO }
}

/// Marks a field as sent, whatever its value.
///
/// Used with `#[serde(default, deserialize_with = "present")]` on
/// `Option<Option<T>>` fields: a missing key stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `Option<bool>` as `"Y"` / `"N"` / `null`.
pub mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(flag) => serializer.serialize_str(super::flag_token(*flag)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        token
            .map(|t| {
                super::parse_flag(&t)
                    .ok_or_else(|| de::Error::invalid_value(de::Unexpected::Str(&t), &"\"Y\" or \"N\""))
            })
            .transpose()
    }
}

/// `Option<Option<bool>>` for update payloads: missing, `null`, or a flag.
pub mod yes_no_patch {
    use serde::Deserializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<bool>>, D::Error> {
        super::yes_no::deserialize(deserializer).map(Some)
    }
}
