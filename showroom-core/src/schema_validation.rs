use jsonschema::Validator;
use serde_json::{json, Value};

/// JSON Schema every catalog entry must satisfy before deserialization
pub fn record_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["id", "cashPrice"],
        "properties": {
            "id": {
                "anyOf": [
                    {"type": "string", "minLength": 1},
                    {"type": "integer"}
                ]
            },
            "cashPrice": {"type": "number"},
            "year": {"type": ["string", "integer", "null"]},
            "brand": {"type": ["string", "object", "null"]},
            "model": {"type": ["string", "object", "null"]},
            "specs": {"type": ["object", "null"]}
        }
    })
}

/// Compile the record schema once per catalog load
pub fn record_validator() -> Result<Validator, String> {
    compile(&record_schema())
}

fn compile(schema: &Value) -> Result<Validator, String> {
    jsonschema::validator_for(schema).map_err(|e| format!("Schema compilation error: {}", e))
}

/// Validate one catalog entry
/// Returns Ok(()) if valid, Err with a message naming the failing location
pub fn validate_record(validator: &Validator, data: &Value) -> Result<(), String> {
    match validator.validate(data) {
        Ok(()) => Ok(()),
        Err(error) => {
            // Format validation error with path
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            Err(format!("{} at {}", error, location))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        record_validator().unwrap()
    }

    #[test]
    fn test_valid_record_passes() {
        let data = json!({
            "id": 1,
            "brand": "Toyota",
            "year": 2023,
            "cashPrice": 50000
        });
        assert!(validate_record(&validator(), &data).is_ok());
    }

    #[test]
    fn test_missing_price_fails() {
        let data = json!({"id": "abc", "brand": "Toyota"});
        let err = validate_record(&validator(), &data).unwrap_err();
        assert!(err.contains("cashPrice"));
    }

    #[test]
    fn test_missing_id_fails() {
        let data = json!({"cashPrice": 1000});
        assert!(validate_record(&validator(), &data).is_err());
    }

    #[test]
    fn test_non_numeric_price_fails_with_location() {
        let data = json!({"id": "abc", "cashPrice": "cheap"});
        let err = validate_record(&validator(), &data).unwrap_err();
        assert!(err.ends_with("at /cashPrice"));
    }

    #[test]
    fn test_empty_string_id_fails() {
        let data = json!({"id": "", "cashPrice": 1000});
        assert!(validate_record(&validator(), &data).is_err());
    }

    #[test]
    fn test_non_object_fails() {
        assert!(validate_record(&validator(), &json!([1, 2])).is_err());
    }
}
