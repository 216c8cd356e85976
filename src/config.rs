use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::math::ratio::price_decimals;
use crate::types::{Bps, Ppm, TokenAmount};

/// Margin added on top of a recomputed liquidation price (1%).
pub const PRICE_SAFETY_MARGIN_BPS: Bps = 100;

/// Buffer added on top of recomputed minimum collateral (1%).
pub const LOAN_BUFFER_BPS: Bps = 100;

/// Debt below this many smallest units is treated as zero.
pub const DUST_DEBT_THRESHOLD: TokenAmount = 1000;

/// Shortest duration interest is charged for.
pub const MIN_LOAN_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

pub const PPM_SCALE: u32 = 1_000_000;

/// Policy knobs of the position solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverCfg {
    pub price_safety_margin_bps: Bps,
    pub loan_buffer_bps: Bps,
    pub dust_debt_threshold: TokenAmount,
}

impl SolverCfg {
    /// MVP defaults
    pub fn mvp() -> Self {
        Self {
            price_safety_margin_bps: PRICE_SAFETY_MARGIN_BPS,
            loan_buffer_bps: LOAN_BUFFER_BPS,
            dust_debt_threshold: DUST_DEBT_THRESHOLD,
        }
    }

    /// Missing fields fall back to the MVP defaults.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self::mvp()
    }
}

/// Terms of the position a new loan is opened against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanCfg {
    /// Fixed annual interest rate.
    pub annual_interest_ppm: Ppm,

    /// Share of the loan withheld at origination.
    pub reserve_contribution_ppm: Ppm,

    /// Decimals of the collateral token. Loan math is scale-free; this fixes
    /// the price scale (`36 - collateral_decimals`) reported in `LoanDetails`.
    pub collateral_decimals: u8,

    pub min_duration_secs: u64,
}

impl LoanCfg {
    /// MVP defaults: 5% APR, 20% reserve, 18-decimal collateral.
    pub fn mvp() -> Self {
        Self {
            annual_interest_ppm: 50_000,
            reserve_contribution_ppm: 200_000,
            collateral_decimals: 18,
            min_duration_secs: MIN_LOAN_DURATION_SECS,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, LoanError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| LoanError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), LoanError> {
        if self.reserve_contribution_ppm >= PPM_SCALE {
            return Err(LoanError::ReserveContributionTooHigh(
                self.reserve_contribution_ppm,
            ));
        }
        if price_decimals(self.collateral_decimals).is_err() {
            return Err(LoanError::DecimalsTooLarge(self.collateral_decimals));
        }
        Ok(())
    }
}

impl Default for LoanCfg {
    fn default() -> Self {
        Self::mvp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_cfg_defaults_match_constants() {
        let cfg = SolverCfg::default();
        assert_eq!(cfg.price_safety_margin_bps, 100);
        assert_eq!(cfg.loan_buffer_bps, 100);
        assert_eq!(cfg.dust_debt_threshold, 1000);
    }

    #[test]
    fn solver_cfg_partial_json_keeps_defaults() {
        let cfg = SolverCfg::from_json(r#"{ "price_safety_margin_bps": 250 }"#).unwrap();
        assert_eq!(cfg.price_safety_margin_bps, 250);
        assert_eq!(cfg.loan_buffer_bps, LOAN_BUFFER_BPS);
        assert_eq!(cfg.dust_debt_threshold, DUST_DEBT_THRESHOLD);
    }

    #[test]
    fn loan_cfg_rejects_full_reserve() {
        let err = LoanCfg::from_json(r#"{ "reserve_contribution_ppm": 1000000 }"#).unwrap_err();
        assert_eq!(err, LoanError::ReserveContributionTooHigh(1_000_000));
    }

    #[test]
    fn loan_cfg_rejects_oversized_decimals() {
        let cfg = LoanCfg {
            collateral_decimals: 37,
            ..LoanCfg::mvp()
        };
        assert_eq!(cfg.validate(), Err(LoanError::DecimalsTooLarge(37)));
    }

    #[test]
    fn loan_cfg_reports_bad_json() {
        assert!(matches!(
            LoanCfg::from_json("not json"),
            Err(LoanError::Config(_))
        ));
    }
}
