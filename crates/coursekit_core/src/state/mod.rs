//! Filter state, transitions and the session that owns loaded data.
//!
//! # Responsibility
//! - Replace implicit global UI state with an explicit `FilterState` plus an
//!   immutable `DataSnapshot` owned by one `Session`.
//! - Express UI events as a pure transition function.

pub mod filter;
pub mod session;
