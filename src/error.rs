use thiserror::Error;

/// Failure of a calculator invocation. Every variant ends the run with exit code 1.
#[derive(Error, Debug)]
pub enum CalcError {
    /// Wrong argument count, unknown flag or an unparsable number
    #[error("{0}")]
    Usage(String),

    /// A parsed value violates a precondition of the calculator
    #[error("{0}")]
    Domain(String),

    #[error("Cannot render result: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Cannot write result: {0}")]
    Io(#[from] std::io::Error),
}

impl CalcError {
    pub fn domain(msg: impl Into<String>) -> Self {
        CalcError::Domain(msg.into())
    }
}
