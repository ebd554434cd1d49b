use crate::error::ConfigError;
use crate::models::Locale;
use serde::{Deserialize, Serialize};

/// Engine settings
///
/// Every field has a default, so an empty TOML table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Records per result page
    pub page_size: usize,
    /// Price slider step; the price domain is rounded outward to it
    pub price_step: f64,
    /// Overrides the catalog's lowest price as the domain minimum
    pub price_floor: Option<f64>,
    /// Overrides the catalog's highest price as the domain maximum
    pub price_ceiling: Option<f64>,
    /// Locale used until the rendering layer sets one
    pub default_locale: Locale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            price_step: 10_000.0,
            price_floor: None,
            price_ceiling: None,
            default_locale: Locale::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if !self.price_step.is_finite() || self.price_step <= 0.0 {
            return Err(ConfigError::InvalidPriceStep(self.price_step));
        }
        if let (Some(floor), Some(ceiling)) = (self.price_floor, self.price_ceiling) {
            if floor >= ceiling {
                return Err(ConfigError::InvertedPriceBounds { floor, ceiling });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"page_size": 3, "default_locale": "AR"}"#).unwrap();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.price_step, 10_000.0);
        assert_eq!(config.default_locale, Locale::new("ar"));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let config = EngineConfig {
            page_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPageSize(0)));
    }

    #[test]
    fn test_rejects_bad_step_and_bounds() {
        let config = EngineConfig {
            price_step: -5.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            price_floor: Some(100.0),
            price_ceiling: Some(50.0),
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedPriceBounds {
                floor: 100.0,
                ceiling: 50.0
            })
        );
    }
}
