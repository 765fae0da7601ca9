//! Error handling for kchain CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for kchain CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot open input file: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Input/Output error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Alignment error: {0}")]
    Alignment(#[from] kchain_core::AlignError),
}

impl CliError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn io<S: Into<String>>(path: PathBuf, message: S) -> Self {
        Self::Io {
            path,
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::Io { .. } => 3,
            Self::Config { .. } => 4,
            Self::Alignment(_) => 5,
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Pass the inputs explicitly with --reference and --query",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your kchain.toml configuration file\n\
                 • Use 'kchain config' to print a sample configuration",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(error.exit_code());
}
