//! Core type system and domain definitions
//!
//! This module provides the central type definitions for the changelog
//! generator. All types are strongly-typed wrappers around the raw strings and
//! numbers GitHub hands back, so that repository identifiers, milestones, and
//! group names cannot be confused with one another.

pub mod changelog;
pub mod issue;
pub mod label;
pub mod milestone;
pub mod repository;

pub use changelog::*;
pub use issue::*;
pub use label::*;
pub use milestone::*;
pub use repository::*;
