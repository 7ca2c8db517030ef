//! Front-matter parsing

use serde::{Deserialize, Deserializer};
use std::fmt;

use super::DocumentError;

/// Header delimiter line
const DELIMITER: &str = "---";

/// A YAML scalar carried as its string form
struct Scalar(String);

struct ScalarVisitor;

impl<'de> serde::de::Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E>(self, value: &str) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value.to_string()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value.to_string()))
    }

    fn visit_bool<E>(self, value: bool) -> Result<Scalar, E>
    where
        E: serde::de::Error,
    {
        Ok(Scalar(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Deserialize any scalar as a string; null stays absent
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(|s| s.0))
}

/// Custom deserializer that handles both a single scalar and a list of scalars
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Option<Scalar>>()? {
                if let Some(Scalar(tag)) = item {
                    vec.push(tag);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
///
/// Every field is optional here; defaults are applied once, in
/// [`PostSummary::from_front_matter`](super::PostSummary::from_front_matter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), DocumentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let (header, body) = match split_header(content) {
            Some(parts) => parts,
            None => return Ok((FrontMatter::default(), content)),
        };

        if header.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = match serde_yaml::from_str::<serde_yaml::Value>(header)? {
            serde_yaml::Value::Null => FrontMatter::default(),
            value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)?,
            _ => {
                return Err(DocumentError::FrontMatter(serde::de::Error::custom(
                    "front-matter must be a mapping of keys to values",
                )))
            }
        };
        Ok((fm, body))
    }
}

/// Split a document into its YAML header and body.
///
/// Returns `None` when the document does not open with a delimiter line.
/// An unterminated header runs to the end of the document.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(DELIMITER)?;

    // The opening line may only name the yaml language
    let line_end = rest.find('\n').unwrap_or(rest.len());
    match rest[..line_end].trim() {
        "" | "yaml" => {}
        _ => return None,
    }

    let rest = &rest[line_end..];
    let close = format!("\n{}", DELIMITER);
    match rest.find(&close) {
        Some(end_pos) => {
            let header = &rest[..end_pos];
            let after = &rest[end_pos + close.len()..];
            // The body starts on the line after the closing delimiter;
            // anything trailing the delimiter on its own line is dropped
            let body = match after.find('\n') {
                Some(nl) => &after[nl + 1..],
                None => "",
            };
            Some((header, body))
        }
        None => Some((rest, "")),
    }
}
