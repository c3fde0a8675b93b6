//! Console backend test support utilities
//!
//! This crate provides utilities for backend testing: HS256 token minting
//! for auth fixtures, Problem Details response assertions, and unified
//! logging initialization. It deliberately does not depend on backend types.

pub mod problem_details;
pub mod test_logging;
pub mod tokens;
