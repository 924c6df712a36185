//! # Cash Flow Utilities
//!
//! $$
//! FV = P(1+r)^t
//! $$
//!
//! Interest and loan formulas for building asset cash-flow inputs.

pub mod interest;
pub mod mortgage;

pub use mortgage::AmortizationEntry;
pub use mortgage::ArmMortgage;
pub use mortgage::FixedRateMortgage;
pub use mortgage::Mortgage;
pub use mortgage::RateChange;
pub use mortgage::TermUnit;
