use std::env;

use crate::criteria::{PostSearchCriteria, PostSearchCriteriaBuilder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::PostSignalError;

/// Ingestion and query settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Page size new criteria start with.
    pub default_page_size: i32,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Fill `mentions` / `hashtags` on normalized posts.
    pub extract_tags: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            log_json: false,
            extract_tags: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Unset variables take defaults;
    /// set-but-invalid variables are an error.
    pub fn from_env() -> Result<Self, PostSignalError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PostSignalError> {
        let defaults = Self::default();

        let default_page_size = match lookup("POSTSIGNAL_DEFAULT_PAGE_SIZE") {
            Some(raw) => {
                let size: i32 = raw.trim().parse().map_err(|_| {
                    PostSignalError::Config(format!(
                        "POSTSIGNAL_DEFAULT_PAGE_SIZE must be a number, got {raw:?}"
                    ))
                })?;
                if !(1..=MAX_PAGE_SIZE).contains(&size) {
                    return Err(PostSignalError::Config(format!(
                        "POSTSIGNAL_DEFAULT_PAGE_SIZE must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                    )));
                }
                size
            }
            None => defaults.default_page_size,
        };

        Ok(Self {
            default_page_size,
            log_json: flag(&lookup, "POSTSIGNAL_LOG_JSON", defaults.log_json)?,
            extract_tags: flag(&lookup, "POSTSIGNAL_EXTRACT_TAGS", defaults.extract_tags)?,
        })
    }

    /// A criteria builder preloaded with this config's page size.
    pub fn criteria_builder(&self) -> PostSearchCriteriaBuilder {
        PostSearchCriteria::builder().size(self.default_page_size)
    }
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, PostSignalError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PostSignalError::Config(format!(
            "{key} must be true or false, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("POSTSIGNAL_DEFAULT_PAGE_SIZE", "100"),
            ("POSTSIGNAL_LOG_JSON", "true"),
            ("POSTSIGNAL_EXTRACT_TAGS", "off"),
        ]))
        .unwrap();
        assert_eq!(config.default_page_size, 100);
        assert!(config.log_json);
        assert!(!config.extract_tags);
        assert_eq!(config.criteria_builder().build().size(), 100);
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let err = Config::from_lookup(lookup_from(&[("POSTSIGNAL_DEFAULT_PAGE_SIZE", "5000")]))
            .unwrap_err();
        assert!(matches!(err, PostSignalError::Config(_)));
    }

    #[test]
    fn rejects_garbage_flag() {
        let err =
            Config::from_lookup(lookup_from(&[("POSTSIGNAL_LOG_JSON", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("POSTSIGNAL_LOG_JSON"));
    }
}
