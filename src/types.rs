// src/types.rs
use serde::{Deserialize, Serialize};

pub type Timestamp = u64;

/// Collateral amount scaled by the collateral token's decimals,
/// or a stablecoin amount scaled by 1e18.
pub type TokenAmount = i128;

/// Liquidation price scaled by `36 - collateral_decimals`.
pub type Price = i128;

/// Parts per million.
pub type Ppm = u32;

/// Basis points (1 bps = 0.01%).
pub type Bps = u32;

/// Parameter the user is editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Collateral,
    LiqPrice,
    Loan,
    Expiration,
}

/// Which quantity besides the target is held constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    KeepLoan,
    KeepLiqPrice,
    KeepCollateral,
    DateOnly,
}

/// Abstract on-chain step of a transaction plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxAction {
    Deposit,
    Withdraw,
    Borrow,
    Repay,
    UpdateExpiration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Increase,
    Decrease,
}
