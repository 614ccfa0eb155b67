//! Cellar catalog domain logic.
//!
//! Everything in this crate is pure: callers load bottles and cellars from
//! storage, pass them in as plain values, and get serializable reports back.
//! There is no database, clock, or network access here.

pub mod aging_window;
pub mod bottle;
pub mod capacity;
pub mod error;
pub mod maturity;
pub mod occupancy;
pub mod ranking;
pub mod types;
pub mod urgency;
pub mod validation;
