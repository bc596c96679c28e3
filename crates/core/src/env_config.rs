//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently.
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name, so parallel runs do not race.
    fn set(var: &str, value: &str) {
        unsafe { std::env::set_var(var, value) };
    }

    fn clear(var: &str) {
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn parses_valid_value() {
        let var_name = "QUOTEBOOK_TEST_ENV_VALID_41207";
        set(var_name, "42");
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        clear(var_name);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let var_name = "QUOTEBOOK_TEST_ENV_SPACES_41208";
        set(var_name, " 7 ");
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 7);
        clear(var_name);
    }

    #[test]
    fn falls_back_on_invalid_value() {
        let var_name = "QUOTEBOOK_TEST_ENV_INVALID_41209";
        set(var_name, "banana");
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        clear(var_name);
    }

    #[test]
    fn falls_back_when_missing() {
        let var_name = "QUOTEBOOK_TEST_ENV_MISSING_41210";
        clear(var_name);
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }
}
