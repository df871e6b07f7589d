use thiserror::Error;

/// Errors surfaced by a mounted WebDAV filesystem.
///
/// Every operation maps its single HTTP round trip onto one of these
/// categories and propagates it to the host unchanged; there is no retry
/// or local recovery.
#[derive(Error, Debug)]
pub enum DavError {
    #[error("Resource not found")]
    NotFound,

    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("Transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid configuration: {details}")]
    InvalidConfiguration { details: String },

    #[error("Malformed multistatus response: {details}")]
    Parse { details: String },

    #[error("Mount has been disposed")]
    Disposed,
}

impl DavError {
    pub(crate) fn invalid_configuration(details: impl Into<String>) -> Self {
        DavError::InvalidConfiguration {
            details: details.into(),
        }
    }

    pub(crate) fn parse(details: impl Into<String>) -> Self {
        DavError::Parse {
            details: details.into(),
        }
    }

    /// True when the remote server answered 404 for the requested path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DavError::NotFound)
    }
}

impl From<reqwest::Error> for DavError {
    fn from(source: reqwest::Error) -> Self {
        DavError::Transport { source }
    }
}
