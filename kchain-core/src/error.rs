use thiserror::Error;

/// Errors that can occur while aligning a query against a reference
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("k-mer index lock poisoned by a failed worker")]
    IndexPoisoned,
}

pub type AlignResult<T> = Result<T, AlignError>;
