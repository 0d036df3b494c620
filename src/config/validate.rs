//! Schema validation for raw configuration values
//!
//! Collects every failure instead of stopping at the first one, so a single
//! error can list everything wrong with a file.

use serde_json::Value;

use crate::constants::config::CONFIG_VERSION;
use crate::types::Framework;

use super::types::Naming;

/// Validate a raw JSON configuration object.
///
/// `version` is required; every other field is optional but must have the
/// right shape when present. Returns the list of failures (empty = valid).
pub fn validate_config(value: &Value) -> Vec<String> {
    let Some(obj) = value.as_object() else {
        return vec!["configuration must be a JSON object".to_string()];
    };

    let mut failures = Vec::new();

    match obj.get("version") {
        Some(Value::String(v)) if v == CONFIG_VERSION => {}
        Some(other) => failures.push(format!(
            "version: expected \"{}\", got {}",
            CONFIG_VERSION, other
        )),
        None => failures.push("version: required".to_string()),
    }

    if let Some(framework) = obj.get("framework") {
        let valid = framework
            .as_str()
            .is_some_and(|s| s.parse::<Framework>().is_ok());
        if !valid {
            failures.push(format!(
                "framework: expected one of vitest, jest, mocha, got {}",
                framework
            ));
        }
    }

    for field in ["testDir", "testPattern"] {
        if let Some(v) = obj.get(field)
            && !v.as_str().is_some_and(|s| !s.trim().is_empty())
        {
            failures.push(format!("{}: expected a non-empty string, got {}", field, v));
        }
    }

    if let Some(plugins) = obj.get("plugins") {
        match plugins.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.as_str().is_some_and(|s| !s.is_empty()) {
                        failures.push(format!(
                            "plugins[{}]: expected a plugin identifier, got {}",
                            i, item
                        ));
                    }
                }
            }
            None => failures.push(format!("plugins: expected an array, got {}", plugins)),
        }
    }

    if let Some(generation) = obj.get("generation") {
        match generation.as_object() {
            Some(gen_obj) => {
                if let Some(colocate) = gen_obj.get("colocate")
                    && !colocate.is_boolean()
                {
                    failures.push(format!(
                        "generation.colocate: expected a boolean, got {}",
                        colocate
                    ));
                }
                if let Some(naming) = gen_obj.get("naming")
                    && !naming.as_str().is_some_and(|s| s.parse::<Naming>().is_ok())
                {
                    failures.push(format!(
                        "generation.naming: expected one of mirror, kebab, flat, got {}",
                        naming
                    ));
                }
            }
            None => failures.push(format!(
                "generation: expected an object, got {}",
                generation
            )),
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_minimal() {
        assert!(validate_config(&json!({"version": "1.0.0"})).is_empty());
    }

    #[test]
    fn test_valid_full() {
        let value = json!({
            "version": "1.0.0",
            "framework": "jest",
            "testDir": "__tests__",
            "testPattern": "**/*.spec.ts",
            "plugins": ["testweave-plugin-jest"],
            "generation": {"colocate": true, "naming": "kebab"}
        });
        assert!(validate_config(&value).is_empty());
    }

    #[test]
    fn test_wrong_version() {
        let failures = validate_config(&json!({"version": "2.0.0"}));
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("version"));
    }

    #[test]
    fn test_collects_all_failures() {
        let value = json!({
            "framework": "ava",
            "testDir": "",
            "plugins": "not-a-list",
            "generation": {"colocate": "yes", "naming": "snake"}
        });
        let failures = validate_config(&value);
        assert_eq!(failures.len(), 6, "{:?}", failures);
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(validate_config(&json!([1, 2])).len(), 1);
    }
}
