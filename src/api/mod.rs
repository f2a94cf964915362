//! Remote content sources for poses

pub mod supabase;

use anyhow::Result;
use thiserror::Error;

use crate::config::Config;
use crate::demo::DemoSource;
use crate::models::Pose;

/// PostgREST error codes meaning the `poses` table is not there (yet)
pub const SCHEMA_MISSING_CODES: &[&str] = &["PGRST116", "42P01", "PGRST205"];

/// Errors from fetching poses
#[derive(Debug, Error)]
pub enum FetchError {
    /// A required argument was empty
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The remote table has not been created
    #[error("poses table not found ({code}). Please run the migration to create the table.")]
    SchemaMissing {
        /// PostgREST/Postgres error code
        code: String,
    },

    /// The server could not be reached
    #[error(
        "Network error: Could not connect to the server. Please check your internet connection. ({0})"
    )]
    Network(#[source] reqwest::Error),

    /// The server answered with an error
    #[error("server error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the server
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e)
        }
    }
}

/// Read-only access to the poses table
#[allow(async_fn_in_trait)]
pub trait PoseSource {
    /// All poses in a category, newest first
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Pose>, FetchError>;

    /// One pose by id within a category
    async fn fetch_by_id(&self, id: &str, category: &str) -> Result<Option<Pose>, FetchError>;

    /// Number of poses in a category
    async fn count_by_category(&self, category: &str) -> Result<usize, FetchError>;
}

/// Reject an empty argument with `message`
pub(crate) fn require(value: &str, message: &'static str) -> Result<(), FetchError> {
    if value.trim().is_empty() {
        Err(FetchError::InvalidArgument(message))
    } else {
        Ok(())
    }
}

/// Unified source that wraps the concrete implementations
pub enum Source {
    /// Supabase (PostgREST) backend
    Supabase(supabase::SupabaseClient),
    /// Bundled offline sample data
    Demo(DemoSource),
}

impl PoseSource for Source {
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Pose>, FetchError> {
        match self {
            Source::Supabase(s) => s.fetch_by_category(category).await,
            Source::Demo(s) => s.fetch_by_category(category).await,
        }
    }

    async fn fetch_by_id(&self, id: &str, category: &str) -> Result<Option<Pose>, FetchError> {
        match self {
            Source::Supabase(s) => s.fetch_by_id(id, category).await,
            Source::Demo(s) => s.fetch_by_id(id, category).await,
        }
    }

    async fn count_by_category(&self, category: &str) -> Result<usize, FetchError> {
        match self {
            Source::Supabase(s) => s.count_by_category(category).await,
            Source::Demo(s) => s.count_by_category(category).await,
        }
    }
}

/// Get the source selected by the configuration
pub fn get_source(config: &Config) -> Result<Source> {
    if config.demo {
        return Ok(Source::Demo(DemoSource::sample()));
    }
    Ok(Source::Supabase(supabase::SupabaseClient::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("couples", "Category is required").is_ok());
        let err = require("  ", "Category is required").unwrap_err();
        assert_eq!(err.to_string(), "Category is required");
    }

    #[test]
    fn test_demo_config_selects_demo_source() {
        let config = Config {
            demo: true,
            ..Config::default()
        };
        assert!(matches!(get_source(&config).unwrap(), Source::Demo(_)));
    }

    #[test]
    fn test_missing_remote_settings_is_an_error() {
        let config = Config::default();
        assert!(get_source(&config).is_err());
    }
}
