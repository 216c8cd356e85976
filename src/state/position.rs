// src/state/position.rs

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::ratio::{loan_value, ratio_k};
use crate::types::{Price, Timestamp, TokenAmount};
use primitive_types::U256;

/// On-chain loan position as read from the chain or an indexer.
///
/// While `debt > 0` the position keeps `liq_price * collateral / debt == k`
/// for the `k` set by the last price-adjusting transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Collateral token units (collateral decimals).
    pub collateral: TokenAmount,

    /// Stablecoin owed (18 decimals).
    pub debt: TokenAmount,

    /// Liquidation price (36 - collateral decimals).
    pub liq_price: Price,

    pub expiration: Timestamp,
}

impl Position {
    pub fn new(collateral: TokenAmount, debt: TokenAmount, liq_price: Price, expiration: Timestamp) -> Self {
        Self {
            collateral,
            debt,
            liq_price,
            expiration,
        }
    }

    /// Debt small enough to be treated as zero.
    pub fn is_dust_debt(&self, threshold: TokenAmount) -> bool {
        self.debt < threshold
    }

    pub fn ratio_k(&self) -> Result<U256, MathError> {
        ratio_k(self.liq_price, self.collateral, self.debt)
    }

    /// Stablecoin value of the collateral at `price`.
    pub fn collateral_value_at(&self, price: Price) -> Result<TokenAmount, MathError> {
        loan_value(self.collateral, price)
    }

    /// Collateral at `price` still covers the debt.
    pub fn is_solvent_at(&self, price: Price) -> Result<bool, MathError> {
        Ok(self.collateral_value_at(price)? >= self.debt)
    }
}
