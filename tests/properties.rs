//! Property tests for the solver and loan calculator.
//!
//! Amount ranges stay in realistic 18-decimal territory so that the 1% margins
//! dominate truncation error.

use position_solver::{
    BasicLoanCalculator, LoanCalculator, LoanCfg, Position, Strategy as Hold, Target, TxAction, solve,
};
use primitive_types::U256;
use proptest::prelude::*;

const E18: i128 = 1_000_000_000_000_000_000;
const T: u64 = 1_750_000_000;

fn collateral_strategy() -> impl Strategy<Value = i128> {
    E18..1_000_000 * E18
}

fn debt_strategy() -> impl Strategy<Value = i128> {
    100 * E18..1_000_000 * E18
}

fn price_strategy() -> impl Strategy<Value = i128> {
    E18..10_000 * E18
}

fn k_of(p: &Position) -> U256 {
    U256::from(p.liq_price as u128) * U256::from(p.collateral as u128) / U256::from(p.debt as u128)
}

/// |k2 - k1| <= 1% of k1 (+2 units of truncation).
fn within_one_percent(k1: U256, k2: U256) -> bool {
    let tol = k1 / U256::from(100u64) + U256::from(2u64);
    if k2 >= k1 { k2 - k1 <= tol } else { k1 - k2 <= tol }
}

proptest! {
    #[test]
    fn keep_loan_collateral_edit_preserves_ratio(
        collateral in collateral_strategy(),
        debt in debt_strategy(),
        price in price_strategy(),
        new_collateral in collateral_strategy(),
    ) {
        let pos = Position::new(collateral, debt, price, T);
        let out = solve(&pos, Target::Collateral, Hold::KeepLoan, new_collateral);

        prop_assert!(out.is_valid);
        prop_assert_eq!(out.next.debt, debt);
        prop_assert!(within_one_percent(k_of(&pos), k_of(&out.next)));
    }

    #[test]
    fn keep_loan_price_edit_preserves_ratio(
        collateral in collateral_strategy(),
        debt in debt_strategy(),
        price in price_strategy(),
        new_price in price_strategy(),
    ) {
        let pos = Position::new(collateral, debt, price, T);
        let out = solve(&pos, Target::LiqPrice, Hold::KeepLoan, new_price);

        prop_assert!(out.is_valid);
        prop_assert_eq!(out.next.debt, debt);
        prop_assert_eq!(out.next.liq_price, new_price);
        prop_assert!(within_one_percent(k_of(&pos), k_of(&out.next)));
    }

    #[test]
    fn valid_outcomes_are_consistent_with_deltas(
        collateral in collateral_strategy(),
        debt in 0..1_000_000 * E18,
        price in price_strategy(),
        target_idx in 0usize..3,
        strategy_idx in 0usize..3,
        new_value in 0..1_000_000 * E18,
    ) {
        let target = [Target::Collateral, Target::LiqPrice, Target::Loan][target_idx];
        let strategy = [Hold::KeepLoan, Hold::KeepLiqPrice, Hold::KeepCollateral][strategy_idx];
        let pos = Position::new(collateral, debt, price, T);
        let out = solve(&pos, target, strategy, new_value);

        if out.is_valid {
            prop_assert_eq!(out.next.collateral, pos.collateral + out.delta_collateral);
            prop_assert_eq!(out.next.debt, pos.debt + out.delta_debt);
            prop_assert_eq!(out.next.liq_price, pos.liq_price + out.delta_liq_price);
            prop_assert_eq!(out.next.expiration, pos.expiration);

            prop_assert_eq!(out.delta_collateral > 0, out.tx_plan.contains(&TxAction::Deposit));
            prop_assert_eq!(out.delta_collateral < 0, out.tx_plan.contains(&TxAction::Withdraw));
            prop_assert_eq!(out.delta_debt > 0, out.tx_plan.contains(&TxAction::Borrow));
            prop_assert_eq!(out.delta_debt < 0, out.tx_plan.contains(&TxAction::Repay));
        } else {
            prop_assert_eq!(out.next, pos);
            prop_assert!(out.tx_plan.is_empty());
            prop_assert!(out.error_message.is_some());
        }
    }

    #[test]
    fn zero_debt_collateral_edit_never_touches_debt_or_price(
        collateral in 0..1_000_000 * E18,
        price in 0..10_000 * E18,
        new_collateral in 0..1_000_000 * E18,
        strategy_idx in 0usize..4,
    ) {
        let strategy = [
            Hold::KeepLoan,
            Hold::KeepLiqPrice,
            Hold::KeepCollateral,
            Hold::DateOnly,
        ][strategy_idx];
        let pos = Position::new(collateral, 0, price, T);
        let out = solve(&pos, Target::Collateral, strategy, new_collateral);

        prop_assert!(out.is_valid);
        prop_assert_eq!(out.next.collateral, new_collateral);
        prop_assert_eq!(out.next.debt, 0);
        prop_assert_eq!(out.next.liq_price, price);
    }

    #[test]
    fn start_price_loan_round_trips_through_wallet_amount(
        collateral in collateral_strategy(),
        price in price_strategy(),
        days in 0u64..730,
    ) {
        let calc = BasicLoanCalculator::new(LoanCfg::mvp()).unwrap();
        let exp = T + days * 86_400;

        let by_price = calc.by_start_liq_price(collateral, price, T, exp).unwrap();
        let by_wallet = calc
            .by_wallet_amount(collateral, by_price.amount_to_send_to_wallet, T, exp)
            .unwrap();

        prop_assert!((by_wallet.loan_amount - by_price.loan_amount).abs() <= 1);
    }

    #[test]
    fn wallet_round_trip_error_is_bounded_by_reserve(
        collateral in collateral_strategy(),
        price in price_strategy(),
        reserve_ppm in 0u32..1_000_000,
    ) {
        let calc = BasicLoanCalculator::new(LoanCfg {
            reserve_contribution_ppm: reserve_ppm,
            ..LoanCfg::mvp()
        })
        .unwrap();
        let exp = T + 90 * 86_400;

        let by_price = calc.by_start_liq_price(collateral, price, T, exp).unwrap();
        let by_wallet = calc
            .by_wallet_amount(collateral, by_price.amount_to_send_to_wallet, T, exp)
            .unwrap();

        let kept = 1_000_000 - reserve_ppm as i128;
        let bound = (1_000_000 + kept - 1) / kept;
        let overshoot = by_wallet.loan_amount - by_price.loan_amount;
        prop_assert!(overshoot >= 0);
        prop_assert!(overshoot <= bound, "overshoot {} > bound {}", overshoot, bound);
    }
}
