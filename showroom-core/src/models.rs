use crate::normalize::facet_key;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Display language tag, stored lower-cased ("en", "ar")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepted wire shapes for localized text
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Plain(String),
    Number(serde_json::Number),
    Map(BTreeMap<String, String>),
}

/// Text with per-locale values and an explicit fallback contract
///
/// `resolve` returns the first non-empty value of: the requested locale,
/// the fallback locale, the primary locale, then any value at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawText")]
pub struct LocalizedText {
    values: BTreeMap<Locale, String>,
    primary_locale: Locale,
    fallback_locale: Locale,
}

impl From<RawText> for LocalizedText {
    fn from(raw: RawText) -> Self {
        match raw {
            RawText::Plain(s) => Self::plain(&s),
            RawText::Number(n) => Self::plain(&n.to_string()),
            RawText::Map(map) => {
                Self::from_pairs(map.iter().map(|(locale, text)| (locale.as_str(), text.as_str())))
            }
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            primary_locale: Locale::default(),
            fallback_locale: Locale::default(),
        }
    }
}

impl LocalizedText {
    /// Locale-neutral text, stored under the default locale
    pub fn plain(text: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(Locale::default(), text.trim().to_string());
        Self {
            values,
            ..Self::default()
        }
    }

    /// Build from (locale, text) pairs
    /// The primary locale is the default locale when present, otherwise the first pair
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut values = BTreeMap::new();
        let mut first = None;
        for (locale, text) in pairs {
            let locale = Locale::new(locale);
            first.get_or_insert_with(|| locale.clone());
            values.insert(locale, text.trim().to_string());
        }

        let default_locale = Locale::default();
        let primary_locale = if values.contains_key(&default_locale) {
            default_locale
        } else {
            first.unwrap_or_default()
        };

        Self {
            values,
            primary_locale,
            fallback_locale: Locale::default(),
        }
    }

    pub fn primary_locale(&self) -> &Locale {
        &self.primary_locale
    }

    fn non_empty(&self, locale: &Locale) -> Option<&str> {
        self.values
            .get(locale)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Resolve the display text for a locale
    pub fn resolve(&self, locale: &Locale) -> &str {
        self.non_empty(locale)
            .or_else(|| self.non_empty(&self.fallback_locale))
            .or_else(|| self.non_empty(&self.primary_locale))
            .or_else(|| self.values.values().map(String::as_str).find(|s| !s.is_empty()))
            .unwrap_or("")
    }

    /// Locale-independent identity used for facet membership
    pub fn key(&self) -> String {
        facet_key(self.resolve(&self.primary_locale))
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|s| s.is_empty())
    }
}

/// Vehicle make with a stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: String,
    pub name: LocalizedText,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBrand {
    Identified {
        #[serde(deserialize_with = "de_text_id")]
        id: String,
        name: LocalizedText,
    },
    Named(LocalizedText),
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let brand = match RawBrand::deserialize(deserializer)? {
            RawBrand::Identified { id, name } => Brand { id, name },
            RawBrand::Named(name) => Brand::from_name(name),
        };
        Ok(brand)
    }
}

impl Brand {
    /// Brand whose id is derived from the primary name
    pub fn from_name(name: LocalizedText) -> Self {
        Self {
            id: name.key(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpecs {
    #[serde(default)]
    pub fuel_type: LocalizedText,
    #[serde(default)]
    pub transmission: LocalizedText,
    #[serde(default)]
    pub seats: LocalizedText,
}

/// A single catalog entry, immutable for the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(deserialize_with = "de_text_id")]
    pub id: String,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub model: LocalizedText,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub year: Option<String>,
    pub cash_price: f64,
    #[serde(default)]
    pub specs: VehicleSpecs,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl VehicleRecord {
    /// Year as text, as compared by the year facet
    pub fn year_text(&self) -> Option<&str> {
        self.year.as_deref().filter(|y| !y.is_empty())
    }

    /// Numeric year for ordering; unparsable or missing years are 0
    pub fn year_number(&self) -> i64 {
        self.year_text()
            .and_then(|y| y.parse::<i64>().ok())
            .unwrap_or(0)
    }

    pub fn brand_id(&self) -> Option<&str> {
        self.brand.as_ref().map(|b| b.id.as_str())
    }

    /// Model label, falling back to the record id
    pub fn model_label(&self, locale: &Locale) -> String {
        let name = self.model.resolve(locale);
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }

    /// Brand and model joined for display
    pub fn display_name(&self, locale: &Locale) -> String {
        match &self.brand {
            Some(brand) => format!("{} {}", brand.name.resolve(locale), self.model_label(locale)),
            None => self.model_label(locale),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s.trim().to_string(),
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn de_text_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let id = TextOrNumber::deserialize(deserializer)?.into_text();
    if id.is_empty() {
        return Err(serde::de::Error::custom("id cannot be empty"));
    }
    Ok(id)
}

fn de_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(TextOrNumber::into_text).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_localized_text_fallback_chain() {
        let text = LocalizedText::from_pairs([("en", "Petrol"), ("ar", "بنزين")]);
        assert_eq!(text.resolve(&Locale::new("ar")), "بنزين");
        assert_eq!(text.resolve(&Locale::new("EN")), "Petrol");
        assert_eq!(text.resolve(&Locale::new("fr")), "Petrol");
    }

    #[test]
    fn test_localized_text_without_default_locale() {
        let text = LocalizedText::from_pairs([("ar", "هجين")]);
        assert_eq!(text.primary_locale(), &Locale::new("ar"));
        assert_eq!(text.resolve(&Locale::new("en")), "هجين");
    }

    #[test]
    fn test_localized_text_empty_value_falls_through() {
        let text = LocalizedText::from_pairs([("en", "Manual"), ("ar", "")]);
        assert_eq!(text.resolve(&Locale::new("ar")), "Manual");
    }

    #[test]
    fn test_key_ignores_display_locale() {
        let text: LocalizedText =
            serde_json::from_value(json!({"en": "Automatic", "ar": "أوتوماتيك"})).unwrap();
        assert_eq!(text.key(), "automatic");
    }

    #[test]
    fn test_record_wire_shapes() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "id": 7,
            "brand": {"id": "toyota", "name": {"en": "Toyota", "ar": "تويوتا"}},
            "model": "Camry",
            "year": 2023,
            "cashPrice": 95000,
            "specs": {"fuelType": {"en": "Petrol"}, "transmission": "Automatic", "seats": 5},
            "color": "white"
        }))
        .unwrap();

        assert_eq!(record.id, "7");
        assert_eq!(record.brand_id(), Some("toyota"));
        assert_eq!(record.year_text(), Some("2023"));
        assert_eq!(record.specs.seats.key(), "5");
        assert_eq!(record.extra.get("color"), Some(&json!("white")));
        assert_eq!(record.display_name(&Locale::new("ar")), "تويوتا Camry");
    }

    #[test]
    fn test_brand_without_id_uses_slug() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "id": "a1",
            "brand": "Mercedes-Benz",
            "cashPrice": 300000
        }))
        .unwrap();
        assert_eq!(record.brand_id(), Some("mercedes-benz"));
        assert_eq!(record.year_number(), 0);
        assert_eq!(record.model_label(&Locale::default()), "a1");
    }

    #[test]
    fn test_unparsable_year_orders_as_zero() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "id": "x",
            "year": "n/a",
            "cashPrice": 1
        }))
        .unwrap();
        assert_eq!(record.year_text(), Some("n/a"));
        assert_eq!(record.year_number(), 0);
    }
}
