//! Repository layer between the dashboard service and key-value storage.
//!
//! # Responsibility
//! - Encode the full project list into one string blob and back.
//! - Reject blobs that decode but violate list invariants.
//!
//! # Invariants
//! - Every save rewrites the whole list; there are no delta writes.
//! - A blob that fails decoding or validation is never partially applied.

pub mod project_repo;
