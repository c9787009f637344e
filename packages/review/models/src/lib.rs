#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Domain models for `Revassign`.
//!
//! Teams own users, users author and review pull requests.

pub mod cascade;
pub mod pr;
pub mod stats;
pub mod team;

pub use cascade::{CascadeFailure, CascadeReport, ErrorCode, Reassignment};
pub use pr::{MAX_REVIEWERS, PrStatus, PullRequest, PullRequestShort};
pub use stats::AssignmentStat;
pub use team::{Team, TeamMember, User};
