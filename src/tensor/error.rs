use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Shape errors detected when building a tensor or an expression node.
///
/// Most shape errors are caught at compile time. This type is returned by the run-time checked
/// constructors (`try_new`, `TryFrom<Vec<T>>`), which never evaluate anything before validating.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShapeError {
    /// A contraction over zero axes was requested. This is an outer product.
    NoContractedAxes,
    /// More axes were contracted than one of the operands has.
    TooManyContractedAxes {
        contracted: usize,
        lhs_rank: usize,
        rhs_rank: usize,
    },
    /// The declared rank of a node does not match the rank implied by its operands.
    RankMismatch { expected: usize, declared: usize },
    /// The contraction consumes every axis. Such contractions produce a plain scalar.
    ScalarResult,
    /// A buffer does not hold exactly `dim^rank` scalars.
    StorageLength { expected: usize, actual: usize },
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoContractedAxes => write!(f, "Contraction must contract at least one axis."),
            Self::TooManyContractedAxes {
                contracted,
                lhs_rank,
                rhs_rank,
            } => write!(
                f,
                "Cannot contract {} axes of operands with ranks {} and {}.",
                contracted, lhs_rank, rhs_rank
            ),
            Self::RankMismatch { expected, declared } => write!(
                f,
                "Operand ranks imply a result of rank {}, but rank {} was declared.",
                expected, declared
            ),
            Self::ScalarResult => write!(
                f,
                "Contraction over all axes yields a scalar. Use `contract_full` instead."
            ),
            Self::StorageLength { expected, actual } => write!(
                f,
                "Expected storage of length {}, but got {} entries.",
                expected, actual
            ),
        }
    }
}

impl Error for ShapeError {}
