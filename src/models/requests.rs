use serde::{Deserialize, Deserializer, Serialize};

/// Inbound chat payload, accepted from a JSON body or a query string
///
/// Decoding never fails on field contents: values of the wrong type,
/// blank strings, zero and unparsable numbers all decode as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub height: Option<f64>,
}

impl ChatRequest {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_measurements(category: impl Into<String>, weight: f64, height: f64) -> Self {
        Self {
            category: Some(category.into()),
            weight: Some(weight),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Fill fields missing here from `other`
    pub fn or(self, other: ChatRequest) -> Self {
        Self {
            message: self.message.or(other.message),
            category: self.category.or(other.category),
            weight: self.weight.or(other.weight),
            height: self.height.or(other.height),
        }
    }

    /// Category, weight and height when all three are present
    pub fn measurements(&self) -> Option<(&str, f64, f64)> {
        match (&self.category, self.weight, self.height) {
            (Some(category), Some(weight), Some(height)) => Some((category, weight, height)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Loose::deserialize(deserializer)? {
        Loose::Number(n) => Some(n),
        Loose::Text(s) => s.trim().parse::<f64>().ok(),
        Loose::Other(_) => None,
    };
    Ok(value.filter(|n| n.is_finite() && *n != 0.0))
}
