//! Environment-driven settings.
//!
//! Values are read from the process environment, after loading a `.env` file
//! from the working directory when one exists.

use std::time::Duration;

use jobstore_core::error::{StoreError, StoreResult};

use crate::filter::KeywordMatch;

pub const CONNECTION_STRING_VAR: &str = "DbConnectionString";
pub const DATABASE_NAME_VAR: &str = "DatabaseName";
pub const COLLECTION_NAME_VAR: &str = "CollectionName";
pub const TIMEOUT_VAR: &str = "DbTimeoutSeconds";
pub const KEYWORD_MATCH_VAR: &str = "KeywordMatch";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStoreConfig {
    pub connection_string: String,
    pub database_name: String,
    /// Collection holding job postings.
    pub collection_name: String,
    /// Bound on the initial dial and on every store call.
    pub timeout_secs: u64,
    pub keyword_match: KeywordMatch,
}

impl JobStoreConfig {
    pub fn new(
        connection_string: impl Into<String>,
        database_name: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            database_name: database_name.into(),
            collection_name: collection_name.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            keyword_match: KeywordMatch::default(),
        }
    }

    /// Reads the configuration from `.env` and the process environment.
    pub fn from_env() -> StoreResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(StoreError::Configuration(format!("failed to read .env: {e}")));
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] when a required variable is missing
    /// or empty, or an optional one cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| StoreError::Configuration(format!("{key} is not set")))
        };

        let mut config = Self::new(
            required(CONNECTION_STRING_VAR)?,
            required(DATABASE_NAME_VAR)?,
            required(COLLECTION_NAME_VAR)?,
        );

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                StoreError::Configuration(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(KEYWORD_MATCH_VAR) {
            config.keyword_match = raw.parse()?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DbConnectionString", "mongodb://localhost:27017"),
        ("DatabaseName", "jobcrawler"),
        ("CollectionName", "jobdetails"),
    ];

    #[test]
    fn required_values_with_defaults() {
        let config = JobStoreConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.connection_string, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "jobcrawler");
        assert_eq!(config.collection_name, "jobdetails");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.keyword_match, KeywordMatch::Exact);
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("DbTimeoutSeconds", "3"));
        vars.push(("KeywordMatch", "contains"));

        let config = JobStoreConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.keyword_match, KeywordMatch::Contains);
    }

    #[test]
    fn missing_or_blank_required_value_is_rejected() {
        let err = JobStoreConfig::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(ref m) if m.contains("CollectionName")));

        let mut vars = REQUIRED.to_vec();
        vars[1] = ("DatabaseName", "  ");
        assert!(matches!(
            JobStoreConfig::from_lookup(lookup(&vars)),
            Err(StoreError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_optional_value_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("DbTimeoutSeconds", "-1"));

        assert!(matches!(
            JobStoreConfig::from_lookup(lookup(&vars)),
            Err(StoreError::Configuration(_))
        ));
    }
}
