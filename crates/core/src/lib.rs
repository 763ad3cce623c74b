//! Domain types, validation, and state machines for the Reelhouse platform.
//!
//! This crate is intentionally free of async and I/O: everything here is
//! pure logic that the `db`, `payments`, and `api` crates build on.

pub mod distributor;
pub mod error;
pub mod film;
pub mod purchase;
pub mod types;
pub mod upload;
pub mod wallet;
