use thiserror::Error;

/// Failure of a generator or registry function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("precondition violated: {reason}")]
    Precondition { reason: String },

    #[error("unknown function {namespace}:{name}")]
    UnknownFunction { namespace: String, name: String },

    #[error("invalid argument at position {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },
}

impl FunctionError {
    pub fn precondition<S: ToString>(str: S) -> Self {
        Self::Precondition { reason: str.to_string() }
    }

    pub fn unknown_function<N: ToString, S: ToString>(namespace: N, name: S) -> Self {
        Self::UnknownFunction { namespace: namespace.to_string(), name: name.to_string() }
    }

    pub fn invalid_argument<S: ToString>(index: usize, str: S) -> Self {
        Self::InvalidArgument { index, reason: str.to_string() }
    }
}

/// Failure to read an extension record from a buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("buffer truncated at offset {offset}: need {required} bytes but only {available} available")]
    Truncated { offset: usize, required: usize, available: usize },

    #[error("negative length {length} at offset {offset}")]
    NegativeLength { offset: usize, length: i32 },

    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },
}

impl DecodeError {
    pub fn truncated(offset: usize, required: usize, available: usize) -> Self {
        Self::Truncated { offset, required, available }
    }
}
