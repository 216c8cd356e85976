// src/services/solver.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SolverCfg;
use crate::error::{SolverError, SolverResult};
use crate::math::ratio::{add_margin_bps, divide_by_k, scale_by_k};
use crate::math::rounding::mul_div;
use crate::state::Position;
use crate::types::{Price, Strategy, Target, TokenAmount, TxAction};

/// One user edit: set `target` to `new_value` while holding what `strategy` names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    pub target: Target,
    pub strategy: Strategy,
    /// Amount in the target's own scale, or a unix timestamp for `Expiration`.
    pub new_value: i128,
}

/// Result of a single solve.
///
/// For valid outcomes `next == current + deltas` exactly.
/// Invalid outcomes carry the unchanged position, zero deltas and an empty plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub next: Position,
    pub delta_collateral: TokenAmount,
    pub delta_debt: TokenAmount,
    pub delta_liq_price: Price,
    pub tx_plan: Vec<TxAction>,
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl Outcome {
    fn invalid(current: &Position, err: &SolverError) -> Self {
        Self {
            next: *current,
            delta_collateral: 0,
            delta_debt: 0,
            delta_liq_price: 0,
            tx_plan: Vec::new(),
            is_valid: false,
            error_message: Some(err.to_string()),
        }
    }

    fn valid(current: &Position, next: Position, tx_plan: Vec<TxAction>) -> SolverResult<Self> {
        Ok(Self {
            next,
            delta_collateral: diff(next.collateral, current.collateral)?,
            delta_debt: diff(next.debt, current.debt)?,
            delta_liq_price: diff(next.liq_price, current.liq_price)?,
            tx_plan,
            is_valid: true,
            error_message: None,
        })
    }

    /// The price raise must land on-chain before the borrow it enables.
    ///
    /// `tx_plan` does not encode this; executors must check it.
    pub fn requires_price_before_borrow(&self) -> bool {
        self.is_valid && self.delta_debt > 0 && self.delta_liq_price > 0
    }

    /// Debt goes to zero; the caller has to repay in full.
    pub fn is_closing(&self) -> bool {
        self.is_valid && self.delta_debt < 0 && self.next.debt == 0
    }
}

fn diff(next: i128, prev: i128) -> SolverResult<i128> {
    next.checked_sub(prev)
        .ok_or_else(|| SolverError::Arithmetic("delta_overflow".into()))
}

/// Deposit | Withdraw, then Borrow | Repay.
fn build_tx_plan(delta_collateral: TokenAmount, delta_debt: TokenAmount) -> Vec<TxAction> {
    let mut plan = Vec::with_capacity(2);
    if delta_collateral > 0 {
        plan.push(TxAction::Deposit);
    }
    if delta_collateral < 0 {
        plan.push(TxAction::Withdraw);
    }
    if delta_debt > 0 {
        plan.push(TxAction::Borrow);
    }
    if delta_debt < 0 {
        plan.push(TxAction::Repay);
    }
    plan
}

/// Invariant-preserving position solver.
pub trait PositionSolver {
    /// Never fails: rejected inputs come back as `is_valid == false`.
    fn solve(&self, pos: &Position, target: Target, strategy: Strategy, new_value: i128) -> Outcome;

    fn solve_request(&self, pos: &Position, req: &AdjustmentRequest) -> Outcome {
        self.solve(pos, req.target, req.strategy, req.new_value)
    }
}

/// Solver driven by `SolverCfg` margins and dust threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicPositionSolver {
    pub cfg: SolverCfg,
}

impl BasicPositionSolver {
    pub fn new(cfg: SolverCfg) -> Self {
        Self { cfg }
    }

    fn try_solve(
        &self,
        pos: &Position,
        target: Target,
        strategy: Strategy,
        new_value: i128,
    ) -> SolverResult<Outcome> {
        if target == Target::Expiration {
            return self.solve_expiration(pos, new_value);
        }
        if pos.is_dust_debt(self.cfg.dust_debt_threshold) {
            return self.solve_without_debt(pos, target, new_value);
        }
        self.solve_with_debt(pos, target, strategy, new_value)
    }

    fn solve_expiration(&self, pos: &Position, new_value: i128) -> SolverResult<Outcome> {
        let expiration = u64::try_from(new_value).map_err(|_| SolverError::InvalidExpiration)?;
        let next = Position { expiration, ..*pos };
        Outcome::valid(pos, next, vec![TxAction::UpdateExpiration])
    }

    /// No enforceable ratio: collateral moves freely, price cannot move.
    fn solve_without_debt(
        &self,
        pos: &Position,
        target: Target,
        new_value: i128,
    ) -> SolverResult<Outcome> {
        match target {
            Target::Collateral => {
                if new_value < 0 {
                    return Err(SolverError::NegativeCollateral);
                }
                let next = Position {
                    collateral: new_value,
                    ..*pos
                };
                let plan = build_tx_plan(diff(new_value, pos.collateral)?, 0);
                Outcome::valid(pos, next, plan)
            }
            Target::Loan if new_value > 0 => {
                let next = Position {
                    debt: new_value,
                    ..*pos
                };
                let plan = build_tx_plan(0, diff(new_value, pos.debt)?);
                Outcome::valid(pos, next, plan)
            }
            Target::Loan | Target::LiqPrice => Err(SolverError::PriceAdjustWithZeroDebt),
            Target::Expiration => self.solve_expiration(pos, new_value),
        }
    }

    fn solve_with_debt(
        &self,
        pos: &Position,
        target: Target,
        strategy: Strategy,
        new_value: i128,
    ) -> SolverResult<Outcome> {
        let k = pos.ratio_k()?;
        if k.is_zero() {
            return Err(SolverError::UnbackedDebt);
        }

        let (collateral, debt, liq_price) = match target {
            Target::Collateral => {
                let new_collateral = new_value;
                if new_collateral < 0 {
                    return Err(SolverError::NegativeCollateral);
                }
                if strategy == Strategy::KeepLoan {
                    if new_collateral == 0 {
                        return Err(SolverError::RepayBeforeFullWithdraw);
                    }
                    // price moves inversely to collateral, then the margin on top
                    let base = mul_div(pos.liq_price, pos.collateral, new_collateral)?;
                    let price = add_margin_bps(base, self.cfg.price_safety_margin_bps)?;
                    (new_collateral, pos.debt, price)
                } else if new_collateral == 0 {
                    // withdrawing everything at a fixed price closes the position
                    (0, 0, pos.liq_price)
                } else {
                    let debt = divide_by_k(pos.liq_price, new_collateral, k)?;
                    (new_collateral, debt, pos.liq_price)
                }
            }
            Target::LiqPrice => {
                let new_price = new_value;
                if new_price <= 0 {
                    return Err(SolverError::NonPositiveLiqPrice);
                }
                if strategy == Strategy::KeepLoan {
                    let collateral = scale_by_k(k, pos.debt, new_price)?;
                    (collateral, pos.debt, new_price)
                } else {
                    let debt = divide_by_k(new_price, pos.collateral, k)?;
                    (pos.collateral, debt, new_price)
                }
            }
            Target::Loan => {
                let new_debt = new_value;
                if new_debt < 0 {
                    return Err(SolverError::NegativeDebt);
                }
                if strategy == Strategy::KeepLiqPrice {
                    let base = scale_by_k(k, new_debt, pos.liq_price)?;
                    let collateral = add_margin_bps(base, self.cfg.loan_buffer_bps)?;
                    (collateral, new_debt, pos.liq_price)
                } else {
                    let price = scale_by_k(k, new_debt, pos.collateral)?;
                    (pos.collateral, new_debt, price)
                }
            }
            Target::Expiration => return self.solve_expiration(pos, new_value),
        };

        let next = Position {
            collateral,
            debt,
            liq_price,
            expiration: pos.expiration,
        };
        if next.collateral == 0 && next.debt > 0 {
            return Err(SolverError::RepayBeforeFullWithdraw);
        }
        let plan = build_tx_plan(
            diff(next.collateral, pos.collateral)?,
            diff(next.debt, pos.debt)?,
        );
        Outcome::valid(pos, next, plan)
    }
}

impl PositionSolver for BasicPositionSolver {
    fn solve(&self, pos: &Position, target: Target, strategy: Strategy, new_value: i128) -> Outcome {
        match self.try_solve(pos, target, strategy, new_value) {
            Ok(outcome) => {
                debug!(
                    ?target,
                    ?strategy,
                    delta_collateral = %outcome.delta_collateral,
                    delta_debt = %outcome.delta_debt,
                    delta_liq_price = %outcome.delta_liq_price,
                    plan = ?outcome.tx_plan,
                    "position solved"
                );
                outcome
            }
            Err(err) => {
                match &err {
                    SolverError::Arithmetic(detail) => {
                        warn!(?target, ?strategy, %new_value, %detail, "solver arithmetic fault")
                    }
                    _ => debug!(?target, ?strategy, %new_value, %err, "adjustment rejected"),
                }
                Outcome::invalid(pos, &err)
            }
        }
    }
}

/// Solve with the default policy.
pub fn solve(pos: &Position, target: Target, strategy: Strategy, new_value: i128) -> Outcome {
    BasicPositionSolver::default().solve(pos, target, strategy, new_value)
}
