#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Reviewer selection for `Revassign`.
//!
//! Selection is pure: it takes a team roster and the current assignment and
//! returns candidate ids. Randomness comes from an injected `RandomSource`
//! so callers can make it deterministic.

mod engine;
mod random;

pub use engine::{AssignmentEngine, AssignmentError};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
