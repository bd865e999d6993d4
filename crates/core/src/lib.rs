//! LuxStore Core - Shared types library.
//!
//! This crate provides the domain types used by the LuxStore components:
//! - `storefront` - Public-facing storefront shell
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Session users, roles, and logical page names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
