//! API Routes
//!
//! Route handlers organized by functionality.

pub mod entries;
pub mod export;
pub mod health;
pub mod summary;
