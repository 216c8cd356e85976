// src/services/catalog.rs
//
// Static strategy metadata shown to the user before solving.
// No validation against the actual position happens here.

use serde::Serialize;

use crate::types::{Direction, Strategy, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StrategyOption {
    pub strategy: Strategy,
    pub label: &'static str,
    pub description: &'static str,
    pub consequence: &'static str,
}

const fn opt(
    strategy: Strategy,
    label: &'static str,
    description: &'static str,
    consequence: &'static str,
) -> StrategyOption {
    StrategyOption {
        strategy,
        label,
        description,
        consequence,
    }
}

const COLLATERAL_UP: &[StrategyOption] = &[
    opt(
        Strategy::KeepLoan,
        "Lower liquidation price",
        "Deposit collateral and keep the loan amount.",
        "Liquidation price decreases; the position becomes safer.",
    ),
    opt(
        Strategy::KeepLiqPrice,
        "Borrow more",
        "Deposit collateral and keep the liquidation price.",
        "Loan increases; the extra amount is sent to your wallet.",
    ),
];

const COLLATERAL_DOWN: &[StrategyOption] = &[
    opt(
        Strategy::KeepLoan,
        "Raise liquidation price",
        "Withdraw collateral and keep the loan amount.",
        "Liquidation price increases; the position becomes riskier.",
    ),
    opt(
        Strategy::KeepLiqPrice,
        "Repay proportionally",
        "Withdraw collateral and keep the liquidation price.",
        "Loan decreases; part of the debt must be repaid.",
    ),
];

const PRICE_UP: &[StrategyOption] = &[
    opt(
        Strategy::KeepLoan,
        "Release collateral",
        "Raise the liquidation price and keep the loan amount.",
        "Collateral is withdrawn to your wallet.",
    ),
    opt(
        Strategy::KeepCollateral,
        "Borrow more",
        "Raise the liquidation price and keep the collateral.",
        "Loan increases; the price is raised before borrowing.",
    ),
];

const PRICE_DOWN: &[StrategyOption] = &[
    opt(
        Strategy::KeepLoan,
        "Add collateral",
        "Lower the liquidation price and keep the loan amount.",
        "More collateral must be deposited.",
    ),
    opt(
        Strategy::KeepCollateral,
        "Repay",
        "Lower the liquidation price and keep the collateral.",
        "Loan decreases; part of the debt must be repaid.",
    ),
];

const LOAN_UP: &[StrategyOption] = &[
    opt(
        Strategy::KeepLiqPrice,
        "Add collateral",
        "Borrow more and keep the liquidation price.",
        "More collateral must be deposited.",
    ),
    opt(
        Strategy::KeepCollateral,
        "Raise liquidation price",
        "Borrow more against the same collateral.",
        "Liquidation price increases; the position becomes riskier.",
    ),
];

const LOAN_DOWN: &[StrategyOption] = &[
    opt(
        Strategy::KeepCollateral,
        "Lower liquidation price",
        "Repay and keep the collateral.",
        "Liquidation price decreases; the position becomes safer.",
    ),
    opt(
        Strategy::KeepLiqPrice,
        "Release collateral",
        "Repay and keep the liquidation price.",
        "Collateral is withdrawn to your wallet.",
    ),
];

const DATE_ONLY: &[StrategyOption] = &[opt(
    Strategy::DateOnly,
    "Change expiration",
    "Move the expiration date only.",
    "Collateral, loan and liquidation price stay unchanged.",
)];

/// Applicable strategies, preferred first.
pub fn options(target: Target, direction: Direction) -> &'static [StrategyOption] {
    match (target, direction) {
        (Target::Collateral, Direction::Increase) => COLLATERAL_UP,
        (Target::Collateral, Direction::Decrease) => COLLATERAL_DOWN,
        (Target::LiqPrice, Direction::Increase) => PRICE_UP,
        (Target::LiqPrice, Direction::Decrease) => PRICE_DOWN,
        (Target::Loan, Direction::Increase) => LOAN_UP,
        (Target::Loan, Direction::Decrease) => LOAN_DOWN,
        (Target::Expiration, _) => DATE_ONLY,
    }
}

pub fn default_strategy(target: Target, direction: Direction) -> Strategy {
    options(target, direction)
        .first()
        .map(|o| o.strategy)
        .unwrap_or(Strategy::DateOnly)
}

/// `None` when nothing changes.
pub fn direction_of(current: i128, new: i128) -> Option<Direction> {
    match new.cmp(&current) {
        std::cmp::Ordering::Greater => Some(Direction::Increase),
        std::cmp::Ordering::Less => Some(Direction::Decrease),
        std::cmp::Ordering::Equal => None,
    }
}
