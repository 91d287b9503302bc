use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    /// Transport-level failure: the request never produced an HTTP response,
    /// or the response body could not be read. There is no body to report.
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status. Carries the raw body.
    #[error("API returned {status}")]
    Api { status: StatusCode, body: String },

    /// The response decoded as JSON but the candidates -> content -> parts
    /// -> text path broke off at `level`.
    #[error("no generated text in response: '{level}' is missing or empty")]
    MissingContent { level: &'static str, body: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    /// The generated text parsed without error but produced no rows.
    #[error("generated text contains no CSV rows")]
    EmptyOutput { body: String },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Raw endpoint response associated with this error, when one was
    /// received at all. Transport errors have none.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. }
            | Self::MissingContent { body, .. }
            | Self::EmptyOutput { body } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
