//! Error types for the Flex Insights exporter.
//!
//! One unified [`Error`] covers every fatal outcome of an export run. Teardown
//! failures have their own type because they are reported, never propagated.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The protocol step an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// POST /gdc/account/login
    Login,
    /// GET /gdc/account/token
    Token,
    /// POST /gdc/app/projects/{workspace}/execute/raw
    ExportRequest,
    /// GET on the report locator
    Download,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Login => "login",
            Stage::Token => "token exchange",
            Stage::ExportRequest => "export request",
            Stage::Download => "download",
        };
        f.write_str(name)
    }
}

/// The unified error type for export runs.
#[derive(Debug, Error)]
pub enum Error {
    /// Login or token exchange failed. The user has to fix their input.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Network failure outside the handshake.
    #[error("{stage} failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The service answered with a status the stage cannot continue from.
    #[error("{stage} returned HTTP {status} for {url}")]
    UnexpectedStatus { stage: Stage, status: u16, url: String },

    /// The service answered 2xx but the body was not what the stage needs.
    #[error("malformed {stage} response: {reason}")]
    MalformedResponse { stage: Stage, reason: String },

    /// The report was still being generated when the retry budget ran out.
    #[error(
        "Report is taking too long to generate. You can download when it is ready here: {url}"
    )]
    NotReady { url: String },

    /// Writing the artifact failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Input validation failed before anything was sent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built (bad URL or header value).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// The JSON body could not be serialized.
    #[error("failed to serialize request body: {message}")]
    Serialization { message: String },

    /// The response body could not be read to the end.
    #[error("failed to read response body: {message}")]
    Body { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Login and token-exchange errors. Never retried.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The request never got an answer.
    #[error("{stage} request failed: {source}. Check your credentials")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The service refused the request.
    #[error("{stage} rejected with HTTP {status}. Check your credentials")]
    Rejected { stage: Stage, status: u16 },

    /// The service answered but the token could not be read from the body.
    #[error("malformed {stage} response: {reason}")]
    Malformed { stage: Stage, reason: String },
}

impl CredentialError {
    /// The handshake step that failed.
    pub fn stage(&self) -> Stage {
        match self {
            CredentialError::Transport { stage, .. }
            | CredentialError::Rejected { stage, .. }
            | CredentialError::Malformed { stage, .. } => *stage,
        }
    }
}

/// Logout failure. Logged as a warning; never changes a run's outcome.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("logout request failed: {0}")]
    Transport(#[source] TransportError),

    #[error("logout returned HTTP {status}")]
    Rejected { status: u16 },

    #[error("cannot derive a profile id from '{profile}'")]
    MissingProfileId { profile: String },
}

/// Artifact persistence errors. Always name the destination.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report stream broke off while saving {}: {source}", .path.display())]
    Stream {
        path: PathBuf,
        #[source]
        source: TransportError,
    },
}

impl PersistenceError {
    /// The destination that could not be written.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PersistenceError::Io { path, .. } | PersistenceError::Stream { path, .. } => path,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid workspace id.
    #[error("invalid workspace id '{value}': {reason}")]
    Workspace { value: String, reason: String },

    /// Invalid report object id.
    #[error("invalid object id '{value}': {reason}")]
    ObjectId { value: String, reason: String },

    /// Invalid report locator.
    #[error("invalid report locator '{value}': {reason}")]
    Locator { value: String, reason: String },
}
