//! Hisaab Core - Shared types library.
//!
//! This crate provides common types used across all Hisaab components:
//! - `fbr` - FBR Digital Invoicing mapper, validator, and transport client
//! - `cli` - Command-line harness for scenario sweeps and submissions
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Orders, FBR tax scenarios, and rate/precision utilities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
