//! Consolidated test utilities for catalog-explorer
//!
//! Integration tests run the real binary against a loopback catalog server,
//! with every user directory pointed into a temporary home.

pub mod assertions;
pub mod fixtures;
pub mod sandbox;
pub mod server;
