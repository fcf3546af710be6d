//! Dashboard use-case services.
//!
//! # Responsibility
//! - Run every operation as validate, confirm, mutate, persist.
//! - Keep front ends decoupled from store and storage details.

pub mod confirm;
pub mod dashboard_service;
