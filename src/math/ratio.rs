// src/math/ratio.rs
//
// Fixed-point ratio engine.
//
// Scales:
//   collateral  -> collateral token decimals (d)
//   debt / loan -> 18
//   price       -> 36 - d
//
// so `price * collateral` is always a 36-decimal quantity and dividing it by
// 1e18 yields an 18-decimal stablecoin amount, whatever `d` is.

use crate::error::MathError;
use crate::math::rounding::{mul_div, mul_div_u256, pow10, to_i128, to_u256};
use crate::types::{Bps, Price, TokenAmount};
use primitive_types::U256;

pub const BPS_SCALE: i128 = 10_000;

pub const STABLECOIN_DECIMALS: u32 = 18;

/// Collateral decimals + price decimals.
pub const PRICE_DECIMALS_SUM: u32 = 36;

fn stablecoin_scale() -> U256 {
    pow10(STABLECOIN_DECIMALS)
}

/// Price decimals for a collateral token with `collateral_decimals`.
pub fn price_decimals(collateral_decimals: u8) -> Result<u32, MathError> {
    PRICE_DECIMALS_SUM
        .checked_sub(collateral_decimals as u32)
        .ok_or(MathError::NegativeOperand)
}

/// k = liq_price * collateral / debt, truncated.
///
/// Kept at full width: with a dust-sized debt the ratio can exceed i128.
pub fn ratio_k(liq_price: Price, collateral: TokenAmount, debt: TokenAmount) -> Result<U256, MathError> {
    mul_div_u256(to_u256(liq_price)?, to_u256(collateral)?, to_u256(debt)?)
}

/// k * a / denom
pub fn scale_by_k(k: U256, a: i128, denom: i128) -> Result<i128, MathError> {
    to_i128(mul_div_u256(k, to_u256(a)?, to_u256(denom)?)?)
}

/// a * b / k
pub fn divide_by_k(a: i128, b: i128, k: U256) -> Result<i128, MathError> {
    to_i128(mul_div_u256(to_u256(a)?, to_u256(b)?, k)?)
}

/// x + x * bps / 10_000. The margin is added on top, never multiplied in.
pub fn add_margin_bps(x: i128, bps: Bps) -> Result<i128, MathError> {
    let margin = mul_div(x, bps as i128, BPS_SCALE)?;
    x.checked_add(margin).ok_or(MathError::MulOverflow)
}

/// Stablecoin value (18 dec) of `collateral` at `price`.
pub fn loan_value(collateral: TokenAmount, price: Price) -> Result<TokenAmount, MathError> {
    to_i128(mul_div_u256(
        to_u256(collateral)?,
        to_u256(price)?,
        stablecoin_scale(),
    )?)
}

/// Price at which `collateral` is worth exactly `loan`.
pub fn price_for_loan(loan: TokenAmount, collateral: TokenAmount) -> Result<Price, MathError> {
    to_i128(mul_div_u256(
        to_u256(loan)?,
        stablecoin_scale(),
        to_u256(collateral)?,
    )?)
}
