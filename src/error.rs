use ::scraper::error::SelectorErrorKind;

/// All errors that can occur during scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum MmaError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to decode a JSON response body.
    #[error("failed to decode json from {url}: {source}")]
    ResponseJson {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A required credential is absent from the environment.
    /// The only failure that aborts a run before it starts.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),
}

impl<'a> From<SelectorErrorKind<'a>> for MmaError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        MmaError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MmaError>;
