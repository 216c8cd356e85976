pub mod ratio;
pub mod rounding;
