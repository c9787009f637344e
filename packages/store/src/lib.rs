#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Storage collaborators for `Revassign`.
//!
//! This crate defines the `Directory` and `PullRequestStore` traits the
//! review service is written against, plus an in-memory implementation and a
//! JSON-file-backed implementation.

mod file;
mod memory;
mod repository;
mod snapshot;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use repository::{Directory, PullRequestStore, Store, StoreError};
pub use revassign_review_models as models;
pub use snapshot::StoreSnapshot;
