//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (error if unset) and `${VAR:-default}`. Bare `$VAR` is
//! left as is so URLs containing `$` survive unchanged.

use crate::ConfigError;

/// Expand `${...}` references in `value`.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of an environment variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_api_key() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_TEST_CACOO_KEY", "k3y");
        }
        let result = expand_env("${RW_TEST_CACOO_KEY}", "cacoo.api_key").unwrap();
        assert_eq!(result, "k3y");
        unsafe {
            std::env::remove_var("RW_TEST_CACOO_KEY");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_TEST_UNSET_API");
        }
        let result = expand_env(
            "${RW_TEST_UNSET_API:-https://cacoo.com/api/v1}",
            "cacoo.api_url",
        )
        .unwrap();
        assert_eq!(result, "https://cacoo.com/api/v1");
    }

    #[test]
    fn test_expand_embedded_in_url() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_TEST_CACOO_HOST", "cacoo.internal");
        }
        let result =
            expand_env("https://${RW_TEST_CACOO_HOST}/diagrams/", "cacoo.base_uri").unwrap();
        assert_eq!(result, "https://cacoo.internal/diagrams/");
        unsafe {
            std::env::remove_var("RW_TEST_CACOO_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_TEST_MISSING_KEY");
        }
        let err = expand_env("${RW_TEST_MISSING_KEY}", "cacoo.api_key").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("RW_TEST_MISSING_KEY"));
        assert!(err.to_string().contains("cacoo.api_key"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(
            expand_env("plain-key", "cacoo.api_key").unwrap(),
            "plain-key"
        );
        assert_eq!(expand_env("$VAR", "cacoo.api_key").unwrap(), "$VAR");
    }
}
