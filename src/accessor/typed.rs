//! Typed lookups over a parsed config
//!
//! Lookups try the parsed value first, then the default. Conversions are
//! strict: no trimming, no partial parses.

use crate::reader::ParsedConfig;

use super::errors::{AccessorError, AccessorResult};

/// Typed access to string values.
///
/// Implementors only provide raw lookups; conversions are shared.
pub trait TypedAccess {
    /// Parsed value of `key`, ignoring defaults
    fn parsed(&self, key: &str) -> Option<&str>;

    /// Fallback value of `key`
    fn fallback(&self, key: &str) -> Option<&str>;

    /// Returns true if `key` was assigned by the config file.
    fn has_key(&self, key: &str) -> bool {
        self.parsed(key).is_some()
    }

    /// Returns the value of `key`, falling back to its default.
    fn get_value(&self, key: &str) -> AccessorResult<String> {
        self.parsed(key)
            .or_else(|| self.fallback(key))
            .map(str::to_string)
            .ok_or_else(|| AccessorError::KeyNotFound(key.to_string()))
    }

    /// Returns the value of `key` as a signed integer.
    fn get_value_as_int(&self, key: &str) -> AccessorResult<i64> {
        let value = self.get_value(key)?;
        value
            .parse::<i64>()
            .map_err(|_| conversion(key, value, "integer"))
    }

    /// Returns the value of `key` as a float.
    fn get_value_as_float(&self, key: &str) -> AccessorResult<f64> {
        let value = self.get_value(key)?;
        value
            .parse::<f64>()
            .map_err(|_| conversion(key, value, "float"))
    }

    /// Returns the value of `key` as a bool.
    ///
    /// Accepts `true`/`false` in any case, and `1`/`0`.
    fn get_value_as_simple_bool(&self, key: &str) -> AccessorResult<bool> {
        let value = self.get_value(key)?;
        parse_simple_bool(&value).ok_or_else(|| conversion(key, value, "bool"))
    }
}

fn conversion(key: &str, value: String, target: &'static str) -> AccessorError {
    AccessorError::Conversion {
        key: key.to_string(),
        value,
        target,
    }
}

/// Parses `true`, `false`, `1` or `0`.
pub fn parse_simple_bool(value: &str) -> Option<bool> {
    if value == "1" || value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl TypedAccess for ParsedConfig {
    fn parsed(&self, key: &str) -> Option<&str> {
        self.get(key)
    }

    fn fallback(&self, key: &str) -> Option<&str> {
        self.defaults().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapAccess {
        parsed: HashMap<&'static str, &'static str>,
        defaults: HashMap<&'static str, &'static str>,
    }

    impl TypedAccess for MapAccess {
        fn parsed(&self, key: &str) -> Option<&str> {
            self.parsed.get(key).copied()
        }

        fn fallback(&self, key: &str) -> Option<&str> {
            self.defaults.get(key).copied()
        }
    }

    fn access() -> MapAccess {
        MapAccess {
            parsed: HashMap::from([
                ("PORT", "8080"),
                ("RATIO", "0.75"),
                ("DEBUG", "TRUE"),
                ("NAME", "svc"),
            ]),
            defaults: HashMap::from([("RETRIES", "3"), ("PORT", "80")]),
        }
    }

    #[test]
    fn test_parsed_value_wins_over_default() {
        assert_eq!(access().get_value_as_int("PORT").unwrap(), 8080);
    }

    #[test]
    fn test_default_used_when_absent() {
        let access = access();
        assert_eq!(access.get_value_as_int("RETRIES").unwrap(), 3);
        assert!(!access.has_key("RETRIES"));
    }

    #[test]
    fn test_missing_key() {
        let err = access().get_value("TIMEOUT").unwrap_err();
        assert_eq!(err, AccessorError::KeyNotFound("TIMEOUT".into()));
        assert_eq!(err.code(), "KVCONF_KEY_NOT_FOUND");
    }

    #[test]
    fn test_conversions() {
        let access = access();
        assert_eq!(access.get_value_as_float("RATIO").unwrap(), 0.75);
        assert!(access.get_value_as_simple_bool("DEBUG").unwrap());
        assert_eq!(access.get_value_as_float("PORT").unwrap(), 8080.0);
    }

    #[test]
    fn test_conversion_failure() {
        let err = access().get_value_as_int("NAME").unwrap_err();
        assert_eq!(err.code(), "KVCONF_CONVERSION_FAILED");
        assert!(err.to_string().contains("'svc'"));

        assert!(access().get_value_as_simple_bool("NAME").is_err());
        assert!(access().get_value_as_int("RATIO").is_err());
    }

    #[test]
    fn test_parse_simple_bool() {
        assert_eq!(parse_simple_bool("true"), Some(true));
        assert_eq!(parse_simple_bool("False"), Some(false));
        assert_eq!(parse_simple_bool("1"), Some(true));
        assert_eq!(parse_simple_bool("0"), Some(false));
        assert_eq!(parse_simple_bool("yes"), None);
        assert_eq!(parse_simple_bool(""), None);
    }
}
