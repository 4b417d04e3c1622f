//! API Access
//!
//! HTTP calls to the Spendwise server.

pub mod client;

pub use client::*;
