//! error types for the solver and loan calculator

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("Collateral cannot be negative")]
    NegativeCollateral,

    #[error("Liquidation price must be positive")]
    NonPositiveLiqPrice,

    #[error("Loan amount cannot be negative")]
    NegativeDebt,

    #[error("Cannot adjust price when debt is zero")]
    PriceAdjustWithZeroDebt,

    #[error("Must repay debt before withdrawing all collateral")]
    RepayBeforeFullWithdraw,

    #[error("Position has no collateral value backing its debt")]
    UnbackedDebt,

    #[error("Expiration must be a valid timestamp")]
    InvalidExpiration,

    /// Detail is logged, not shown.
    #[error("Calculation error")]
    Arithmetic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("collateral must be positive")]
    ZeroCollateral,

    #[error("reserve contribution must be below 100% (got {0} ppm)")]
    ReserveContributionTooHigh(u32),

    #[error("collateral decimals must be at most 36 (got {0})")]
    DecimalsTooLarge(u8),

    #[error("amount cannot be negative")]
    NegativeAmount,

    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("invalid config: {0}")]
    Config(String),
}

/// Shared by the math helpers; each service maps it into its own error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivByZero,

    #[error("mul overflow")]
    MulOverflow,

    #[error("result does not fit in i128")]
    Narrowing,

    #[error("negative operand")]
    NegativeOperand,
}

impl From<MathError> for SolverError {
    fn from(e: MathError) -> Self {
        SolverError::Arithmetic(e.to_string())
    }
}

impl From<MathError> for LoanError {
    fn from(e: MathError) -> Self {
        LoanError::Arithmetic(e.to_string())
    }
}

pub type SolverResult<T> = std::result::Result<T, SolverError>;
pub type LoanResult<T> = std::result::Result<T, LoanError>;
