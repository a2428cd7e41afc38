// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Fetch(FetchError),
    Decode(String),
}

/// Reasons a page source could not be turned into bytes.
///
/// Fetch failures are never shown to the user: the page keeps its loading
/// placeholder. The variants exist for logging and for the optional
/// fetch-error hook on the viewer component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The remote server answered with a non-success status.
    Status(u16),

    /// The transfer failed (DNS, TLS, connection reset, ...).
    Transport(String),

    /// The payload exceeded the accepted size.
    TooLarge { limit: u64 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "HTTP status {}", code),
            FetchError::Transport(msg) => write!(f, "transfer failed: {}", msg),
            FetchError::TooLarge { limit } => {
                write!(f, "payload larger than {} bytes", limit)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Fetch(FetchError::Status(status.as_u16())),
            None => Error::Fetch(FetchError::Transport(err.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
