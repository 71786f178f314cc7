use miette::Diagnostic;
use thiserror::Error;

/// Main error type for lcdc operations
#[derive(Error, Diagnostic, Debug)]
pub enum LcdError {
    #[error("IO error: {0}")]
    #[diagnostic(code(lcdc::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(lcdc::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(lcdc::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(lcdc::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(lcdc::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid value: {message}")]
    #[diagnostic(code(lcdc::value))]
    Value {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, LcdError>;
