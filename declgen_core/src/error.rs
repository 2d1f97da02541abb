use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Filter file error in {path}: {message}")]
    FilterFile { path: PathBuf, message: String },

    #[error("Malformed member metadata for '{member}': {message}")]
    MalformedMember { member: String, message: String },

    #[error("Unknown generator id: {0}")]
    UnknownGenerator(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<regex::Error> for DeclgenError {
    fn from(err: regex::Error) -> Self {
        DeclgenError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeclgenError>;

impl DeclgenError {
    pub fn config(message: impl Into<String>) -> Self {
        DeclgenError::Config(message.into())
    }

    pub fn initialization(message: impl Into<String>) -> Self {
        DeclgenError::Initialization(message.into())
    }

    pub fn filter_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DeclgenError::FilterFile {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn malformed_member(member: impl Into<String>, message: impl Into<String>) -> Self {
        DeclgenError::MalformedMember {
            member: member.into(),
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        DeclgenError::Unknown(message.into())
    }
}
