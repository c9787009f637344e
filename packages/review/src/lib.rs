#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pull request lifecycle and reviewer reassignment for `Revassign`.
//!
//! `ReviewService` drives the `OPEN -> MERGED` state machine, picks
//! reviewers through `AssignmentEngine`, and runs the best-effort
//! reassignment cascade when users or teams are deactivated.

mod cascade;
mod error;
mod lifecycle;
mod locks;
mod service;

pub use error::ReviewError;
pub use lifecycle::Reassigned;
pub use revassign_review_models as models;
pub use service::ReviewService;
