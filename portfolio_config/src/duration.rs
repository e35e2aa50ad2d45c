use std::{ops::Deref, str::FromStr};

use serde::Deserialize;

/// A duration written as whitespace separated parts like `"1d 2h 30m"`.
///
/// Supported units are `ms`, `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_part)
            .try_fold(std::time::Duration::ZERO, |acc, part| {
                acc.checked_add(part?).ok_or("Duration overflow")
            })
            .map(Self)
    }
}

fn parse_part(part: &str) -> Result<std::time::Duration, &'static str> {
    let split = part
        .find(|c: char| !c.is_ascii_digit())
        .ok_or("Missing duration unit")?;
    let (value, unit) = part.split_at(split);
    let value = value.parse::<u64>().map_err(|_| "Invalid duration value")?;

    let millis_per_unit = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return Err("Invalid duration unit"),
    };

    value
        .checked_mul(millis_per_unit)
        .map(std::time::Duration::from_millis)
        .ok_or("Duration overflow")
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13_000)),
            ("250ms", Some(250)),
            ("42m", Some(42 * 60 * 1000)),
            ("7h", Some(7 * 60 * 60 * 1000)),
            ("20d", Some(20 * 24 * 60 * 60 * 1000)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some((((24 + 2) * 60 + 3) * 60 + 4) * 1000)),
            ("xyz", None),
            ("7dd", None),
            ("12", None),
            ("s", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input.clone())
                .ok()
                .map(|x| x.0.as_millis());
            assert_eq!(output, expected, "{input}");
        }
    }
}
