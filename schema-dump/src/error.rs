use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaDumpError {
    #[error("Error from postgres: `{0}`")]
    PostgresError(#[from] tokio_postgres::Error),

    #[error("Error from postgres: `{query}` when executing query: `{source}`")]
    PostgresErrorWithQuery {
        query: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed to configure tls for postgres: `{0}`")]
    TlsError(#[from] rustls::Error),

    #[error("Failed to {action} '{}': `{source}`", .path.display())]
    FileError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {action}: `{source}`")]
    HttpError {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {action}: server responded with status {status}")]
    UnexpectedStatus {
        action: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response when trying to {action}: `{source}`")]
    DecodeError {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to {action} '{key}' in the secret store: `{source}`")]
    SecretStoreError {
        action: &'static str,
        key: String,
        #[source]
        source: keyring::Error,
    },

    #[error("The completion service returned no choices")]
    EmptyCompletion,

    #[error("Background task failed: `{0}`")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub type Result<T = ()> = std::result::Result<T, SchemaDumpError>;
