use serde::{Deserialize, Deserializer, Serialize};

/// Garment category a size chart is defined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Men,
    Women,
}

impl SizeCategory {
    /// Parse a free-form category string. Unknown categories yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("men") {
            Some(Self::Men)
        } else if raw.eq_ignore_ascii_case("women") {
            Some(Self::Women)
        } else {
            None
        }
    }
}

/// Inclusive numeric band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One row of the size chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRule {
    pub label: &'static str,
    pub weight_kg: Band,
    pub height_cm: Band,
}

impl SizeRule {
    pub const fn new(label: &'static str, weight_kg: (f64, f64), height_cm: (f64, f64)) -> Self {
        Self {
            label,
            weight_kg: Band::new(weight_kg.0, weight_kg.1),
            height_cm: Band::new(height_cm.0, height_cm.1),
        }
    }

    #[inline]
    pub fn matches(&self, weight: f64, height: f64) -> bool {
        self.weight_kg.contains(weight) && self.height_cm.contains(height)
    }
}

/// Outcome of a size lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSuggestion {
    Label(&'static str),
    /// No band matched; the caller should re-check weight and height
    Guidance,
}

/// Product as returned by the store's search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default, deserialize_with = "price_display")]
    pub price: String,
    #[serde(default)]
    pub permalink: String,
}

/// WooCommerce sends prices as strings, but accept plain numbers too
fn price_display<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
        Missing(Option<()>),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(s) => s,
        Price::Number(n) => n.to_string(),
        Price::Missing(_) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(SizeCategory::parse("men"), Some(SizeCategory::Men));
        assert_eq!(SizeCategory::parse(" Women "), Some(SizeCategory::Women));
        assert_eq!(SizeCategory::parse("kids"), None);
        assert_eq!(SizeCategory::parse(""), None);
    }

    #[test]
    fn test_band_is_inclusive() {
        let band = Band::new(60.0, 75.0);
        assert!(band.contains(60.0));
        assert!(band.contains(75.0));
        assert!(!band.contains(75.5));
        assert!(!band.contains(f64::NAN));
    }

    #[test]
    fn test_product_price_number_or_string() {
        let p: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Tote", "price": "250", "permalink": "https://shop/tote"}"#,
        )
        .unwrap();
        assert_eq!(p.price, "250");

        let p: Product =
            serde_json::from_str(r#"{"name": "X", "price": 100, "permalink": "u"}"#).unwrap();
        assert_eq!(p.price, "100");
        assert_eq!(p.permalink, "u");
    }
}
