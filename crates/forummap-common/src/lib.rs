//! Common utilities for forummap.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated, colored terminal diagnostics for
//!   recoverable input problems

pub mod warning;
