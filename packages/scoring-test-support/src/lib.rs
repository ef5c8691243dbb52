//! Shared test support for the live scoring crates.
//!
//! Integration test binaries install logging through [`logging::init`].

pub mod logging;
