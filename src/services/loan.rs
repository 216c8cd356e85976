use serde::Serialize;
use tracing::debug;

use crate::config::{LoanCfg, PPM_SCALE};
use crate::error::{LoanError, LoanResult};
use crate::math::ratio::{loan_value, price_decimals, price_for_loan};
use crate::math::rounding::mul_div;
use crate::types::{Price, Timestamp, TokenAmount};

pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Terms of a freshly opened loan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanDetails {
    /// Debt minted at origination (18 dec).
    pub loan_amount: TokenAmount,
    /// Nominal rate in percent.
    pub apr_percent: f64,
    /// Rate grossed up for the reserve contribution.
    pub effective_interest_percent: f64,
    pub interest_until_expiration: TokenAmount,
    pub reserve_contribution: TokenAmount,
    pub amount_to_send_to_wallet: TokenAmount,
    pub required_collateral: TokenAmount,
    pub start_liq_price: Price,
    pub liq_price_at_expiration: Price,
    /// Decimals both liquidation prices are scaled by.
    pub price_decimals: u32,
}

/// Origination math. Each entry point picks a different free variable.
pub trait LoanCalculator {
    /// Back-solves the loan from the liquidation price wanted at expiration.
    fn by_end_liq_price(
        &self,
        collateral: TokenAmount,
        end_liq_price: Price,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails>;

    fn by_start_liq_price(
        &self,
        collateral: TokenAmount,
        start_liq_price: Price,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails>;

    /// "You get": loan sized so the wallet receives `wallet_amount` after the reserve cut.
    ///
    /// Inverting the truncated reserve cut overshoots the original loan by at
    /// most `ceil(1e6 / (1e6 - reserve_ppm))` units: 1 for reserves up to 50%,
    /// growing as the reserve approaches 100%.
    fn by_wallet_amount(
        &self,
        collateral: TokenAmount,
        wallet_amount: TokenAmount,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BasicLoanCalculator {
    cfg: LoanCfg,
}

impl BasicLoanCalculator {
    pub fn new(cfg: LoanCfg) -> LoanResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn cfg(&self) -> &LoanCfg {
        &self.cfg
    }

    /// Interest is charged for at least `min_duration_secs`.
    pub fn duration_secs(&self, start: Timestamp, expiration: Timestamp) -> u64 {
        expiration
            .saturating_sub(start)
            .max(self.cfg.min_duration_secs)
    }

    /// YEAR * 1e6
    fn year_ppm() -> i128 {
        SECONDS_PER_YEAR as i128 * PPM_SCALE as i128
    }

    /// duration * annual rate, same scale as `year_ppm`.
    fn accrual(&self, start: Timestamp, expiration: Timestamp) -> LoanResult<i128> {
        (self.duration_secs(start, expiration) as i128)
            .checked_mul(self.cfg.annual_interest_ppm as i128)
            .ok_or_else(|| LoanError::Arithmetic("accrual_overflow".into()))
    }

    fn interest_on(&self, loan: TokenAmount, start: Timestamp, expiration: Timestamp) -> LoanResult<TokenAmount> {
        Ok(mul_div(loan, self.accrual(start, expiration)?, Self::year_ppm())?)
    }

    fn reserve_on(&self, loan: TokenAmount) -> LoanResult<TokenAmount> {
        Ok(mul_div(
            loan,
            self.cfg.reserve_contribution_ppm as i128,
            PPM_SCALE as i128,
        )?)
    }

    fn apr_percent(&self) -> f64 {
        self.cfg.annual_interest_ppm as f64 / 1e4
    }

    fn effective_interest_percent(&self) -> f64 {
        let kept = 1.0 - self.cfg.reserve_contribution_ppm as f64 / PPM_SCALE as f64;
        self.apr_percent() / kept
    }

    fn check_inputs(collateral: TokenAmount, amount: i128) -> LoanResult<()> {
        if collateral <= 0 {
            return Err(LoanError::ZeroCollateral);
        }
        if amount < 0 {
            return Err(LoanError::NegativeAmount);
        }
        Ok(())
    }

    /// Assemble details around a known starting loan.
    fn details(
        &self,
        collateral: TokenAmount,
        loan_amount: TokenAmount,
        interest: TokenAmount,
        start_liq_price: Price,
        liq_price_at_expiration: Price,
    ) -> LoanResult<LoanDetails> {
        let reserve_contribution = self.reserve_on(loan_amount)?;
        let amount_to_send_to_wallet = (loan_amount - reserve_contribution).max(0);

        let details = LoanDetails {
            loan_amount,
            apr_percent: self.apr_percent(),
            effective_interest_percent: self.effective_interest_percent(),
            interest_until_expiration: interest,
            reserve_contribution,
            amount_to_send_to_wallet,
            required_collateral: collateral,
            start_liq_price,
            liq_price_at_expiration,
            price_decimals: price_decimals(self.cfg.collateral_decimals)?,
        };
        debug!(
            loan = %details.loan_amount,
            interest = %details.interest_until_expiration,
            reserve = %details.reserve_contribution,
            wallet = %details.amount_to_send_to_wallet,
            "loan details computed"
        );
        Ok(details)
    }

    /// Starting loan and price are known; project them to expiration.
    fn forward(
        &self,
        collateral: TokenAmount,
        loan_amount: TokenAmount,
        start_liq_price: Price,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails> {
        let interest = self.interest_on(loan_amount, start, expiration)?;
        let loan_at_end = loan_amount
            .checked_add(interest)
            .ok_or_else(|| LoanError::Arithmetic("loan_at_end_overflow".into()))?;
        let end_price = price_for_loan(loan_at_end, collateral)?;
        self.details(collateral, loan_amount, interest, start_liq_price, end_price)
    }
}

impl LoanCalculator for BasicLoanCalculator {
    fn by_end_liq_price(
        &self,
        collateral: TokenAmount,
        end_liq_price: Price,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails> {
        Self::check_inputs(collateral, end_liq_price)?;

        let loan_at_end = loan_value(collateral, end_liq_price)?;
        let year_ppm = Self::year_ppm();
        let loan_at_start = mul_div(loan_at_end, year_ppm, year_ppm + self.accrual(start, expiration)?)?;
        let interest = loan_at_end - loan_at_start;
        let start_price = price_for_loan(loan_at_start, collateral)?;

        self.details(collateral, loan_at_start, interest, start_price, end_liq_price)
    }

    fn by_start_liq_price(
        &self,
        collateral: TokenAmount,
        start_liq_price: Price,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails> {
        Self::check_inputs(collateral, start_liq_price)?;

        let loan_amount = loan_value(collateral, start_liq_price)?;
        self.forward(collateral, loan_amount, start_liq_price, start, expiration)
    }

    fn by_wallet_amount(
        &self,
        collateral: TokenAmount,
        wallet_amount: TokenAmount,
        start: Timestamp,
        expiration: Timestamp,
    ) -> LoanResult<LoanDetails> {
        Self::check_inputs(collateral, wallet_amount)?;

        let kept_ppm = (PPM_SCALE - self.cfg.reserve_contribution_ppm) as i128;
        let loan_amount = mul_div(wallet_amount, PPM_SCALE as i128, kept_ppm)?;
        let start_price = price_for_loan(loan_amount, collateral)?;
        self.forward(collateral, loan_amount, start_price, start, expiration)
    }
}
