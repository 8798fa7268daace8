use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A board input file whose name routes to no dashboard kind.
    #[error("input file {name} is not recognised; did you mean one of these?\n{expected}")]
    UnrecognizedInput { name: String, expected: String },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration in {}: {field} = {value} is out of range", path.display())]
    ConfigValue {
        path: PathBuf,
        field: &'static str,
        value: i64,
    },

    #[error("invalid reference time {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
