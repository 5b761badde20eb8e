//! Common types shared across the CultureVerse Lens crates.
//!
//! This crate sits at the bottom of the dependency hierarchy:
//! - Has NO dependencies on other workspace crates
//! - Provides the craft identifiers and routes every other crate speaks in
//! - Owns the tracing setup hosts call once at startup

pub mod crafts;
pub mod logging;
pub mod routing;

pub use crafts::{CraftId, UnknownCraft};
pub use logging::{init_tracing, LogLevel};
pub use routing::Route;
