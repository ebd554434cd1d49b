use std::path::Path;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_catalog_load_error(error: &str, path: &Path) -> (String, String, String) {
    if error.contains("No such file") {
        (
            "File Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        )
    } else if error.contains("Permission denied") {
        (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        )
    } else if error.contains("array") {
        (
            "Invalid Catalog".to_string(),
            "The catalog must be a JSON array of vehicle records.".to_string(),
            error.to_string(),
        )
    } else if error.contains("JSON") {
        (
            "Invalid JSON".to_string(),
            "The catalog file is not valid JSON.".to_string(),
            error.to_string(),
        )
    } else {
        (
            "Error Loading Catalog".to_string(),
            "Failed to load the vehicle catalog.".to_string(),
            error.to_string(),
        )
    }
}

/// Map configuration errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_config_error(error: &anyhow::Error, path: Option<&Path>) -> (String, String, String) {
    let details = format!("{:#}", error);
    let location = path
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default();

    (
        "Configuration Error".to_string(),
        format!("The engine configuration{} is invalid.", location),
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let (title, _, details) = map_catalog_load_error(
            "IO error: No such file or directory (os error 2)",
            Path::new("cars.json"),
        );
        assert_eq!(title, "File Not Found");
        assert!(details.contains("cars.json"));
    }

    #[test]
    fn test_fallback_keeps_error_text() {
        let (title, _, details) = map_catalog_load_error("provider offline", Path::new("x"));
        assert_eq!(title, "Error Loading Catalog");
        assert_eq!(details, "provider offline");
    }
}
