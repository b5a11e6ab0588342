//! Core library for bfhl
//!
//! This crate implements the **Functional Core** of the bfhl service,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`bfhl_core`** (this crate): Pure transformation functions with zero I/O
//! - **`bfhl`**: HTTP server, CLI and orchestration (the Imperative Shell)
//!
//! Every function here is deterministic: the same payload always produces
//! the same envelope, so the tests are plain fixture data with no mocking.
//!
//! # Module Organization
//!
//! - [`classify`]: Token classification, sum and the concatenation transform
//! - [`envelope`]: Payload validation, token canonicalisation and response shapes
//!
//! # Example Usage
//!
//! ```rust
//! use bfhl_core::classify::classify;
//!
//! let result = classify(&["a", "1", "334", "4", "R", "$"]);
//!
//! assert_eq!(result.even_numbers, vec!["334", "4"]);
//! assert_eq!(result.sum, "339");
//! assert_eq!(result.concat_string, "Ra");
//! ```

pub mod classify;
pub mod envelope;
