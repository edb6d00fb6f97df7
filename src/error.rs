use thiserror::Error;

/// Failures inside the fetch layer.
///
/// These never leave a fetcher: each one maps them onto its own fixed
/// sentence before the reply reaches the conversation.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} answered with HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("unexpected {service} payload: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} returned no usable result")]
    MissingField { service: &'static str },

    #[error("no {0} configured")]
    MissingCredential(&'static str),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
