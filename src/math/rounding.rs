use crate::error::MathError;
use primitive_types::U256;

/// 10^n as U256.
pub fn pow10(n: u32) -> U256 {
    U256::exp10(n as usize)
}

/// Widen a non-negative amount.
pub fn to_u256(x: i128) -> Result<U256, MathError> {
    if x < 0 {
        return Err(MathError::NegativeOperand);
    }
    Ok(U256::from(x as u128))
}

/// Narrow back into the stored amount type.
pub fn to_i128(v: U256) -> Result<i128, MathError> {
    if v > U256::from(i128::MAX as u128) {
        return Err(MathError::Narrowing);
    }
    Ok(v.as_u128() as i128)
}

/// floor(a * b / denom), multiplication first, no intermediate rounding.
pub fn mul_div_u256(a: U256, b: U256, denom: U256) -> Result<U256, MathError> {
    if denom.is_zero() {
        return Err(MathError::DivByZero);
    }
    let n = a.checked_mul(b).ok_or(MathError::MulOverflow)?;
    Ok(n / denom)
}

/// floor(a * b / denom) for non-negative i128 operands.
pub fn mul_div(a: i128, b: i128, denom: i128) -> Result<i128, MathError> {
    let q = mul_div_u256(to_u256(a)?, to_u256(b)?, to_u256(denom)?)?;
    to_i128(q)
}
