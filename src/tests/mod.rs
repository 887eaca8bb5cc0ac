//! Crate-internal tests and shared test utilities

pub mod helpers;
