//! Collateralized-loan position solver.
//!
//! Pure fixed-point math: given an on-chain position and an edit to one of
//! its parameters, compute the next position, the deltas and the ordered
//! transaction plan. Also carries the origination calculator used when a new
//! position is opened and the static strategy catalog.

pub mod config;
pub mod error;
pub mod math;
pub mod services;
pub mod state;
pub mod types;

pub use config::{LoanCfg, SolverCfg};
pub use error::{LoanError, MathError, SolverError};
pub use services::catalog::{StrategyOption, default_strategy, direction_of, options};
pub use services::loan::{BasicLoanCalculator, LoanCalculator, LoanDetails};
pub use services::solver::{AdjustmentRequest, BasicPositionSolver, Outcome, PositionSolver, solve};
pub use state::Position;
pub use types::{Direction, Strategy, Target, TxAction};
