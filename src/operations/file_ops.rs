use anyhow::{Context, Result};
use showroom_core::EngineConfig;
use std::fs;
use std::path::Path;

/// Load engine settings from an optional TOML file
/// Without a path the defaults are used
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&content)?
        }
        None => EngineConfig::default(),
    };
    Ok(config)
}

/// Parse and validate a TOML configuration
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content).context("failed to parse config")?;
    config.validate()?;
    Ok(config)
}

/// Apply command-line overrides on top of file settings
pub fn apply_overrides(
    mut config: EngineConfig,
    page_size: Option<usize>,
    locale: Option<&str>,
) -> Result<EngineConfig> {
    if let Some(page_size) = page_size {
        config.page_size = page_size;
    }
    if let Some(locale) = locale {
        config.default_locale = showroom_core::Locale::new(locale);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config("page_size = 4\nprice_floor = 20000.0\ndefault_locale = \"ar\"").unwrap();
        assert_eq!(config.page_size, 4);
        assert_eq!(config.price_floor, Some(20_000.0));
        assert_eq!(config.default_locale.as_str(), "ar");
        assert_eq!(config.price_step, 10_000.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config("page_size = 0").is_err());
        assert!(parse_config("price_floor = 50.0\nprice_ceiling = 10.0").is_err());
        assert!(parse_config("page_size = \"many\"").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(EngineConfig::default(), Some(3), Some("fr")).unwrap();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.default_locale.as_str(), "fr");
        assert!(apply_overrides(EngineConfig::default(), Some(0), None).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/showroom.toml"))).is_err());
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }
}
