//! Domain model for the project dashboard.
//!
//! # Responsibility
//! - Define the canonical project/task records shared by store, repository
//!   and view layers.
//! - Provide the fixed seed data set used when storage has nothing usable.
//!
//! # Invariants
//! - Project ids are unique across the whole list.
//! - Task ids are unique within their owning project only.

pub mod project;
pub mod seed;
