//! Error types for Tucker3 kernel operations
//!
//! Kernels validate the extents of every operand they combine; these errors
//! describe which operand disagreed and how.

use std::fmt;

/// Error type for kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Dimension mismatch between operands
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// Invalid mode/axis specification
    InvalidMode {
        mode: usize,
        max_mode: usize,
        context: String,
    },

    /// A basis matrix whose shape does not fit the tensor it is applied to
    FactorMismatch {
        operation: String,
        mode: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Generic operation error with context
    OperationError { operation: String, message: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::DimensionMismatch {
                operation,
                expected,
                actual,
                context,
            } => write!(
                f,
                "{}: dimension mismatch - expected {:?}, got {:?}. {}",
                operation, expected, actual, context
            ),

            KernelError::InvalidMode {
                mode,
                max_mode,
                context,
            } => write!(
                f,
                "Invalid mode {}: must be < {}. {}",
                mode, max_mode, context
            ),

            KernelError::FactorMismatch {
                operation,
                mode,
                expected,
                actual,
            } => write!(
                f,
                "{}: factor for mode {} must be {}×{}, got {}×{}",
                operation, mode, expected.0, expected.1, actual.0, actual.1
            ),

            KernelError::OperationError { operation, message } => {
                write!(f, "{}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        KernelError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create an invalid mode error
    pub fn invalid_mode(mode: usize, max_mode: usize, context: impl Into<String>) -> Self {
        KernelError::InvalidMode {
            mode,
            max_mode,
            context: context.into(),
        }
    }

    /// Create a factor mismatch error
    pub fn factor_mismatch(
        operation: impl Into<String>,
        mode: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        KernelError::FactorMismatch {
            operation: operation.into(),
            mode,
            expected,
            actual,
        }
    }

    /// Create a generic operation error
    pub fn operation_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::OperationError {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
