//! Declarative field extraction and reshaping
//!
//! A [`TransformSpec`] describes which fields to pull out of a nested record
//! and under which keys to put them. [`transform`] evaluates a spec against a
//! `serde_json::Value` and returns a flat, ordered map of results.
//!
//! # Module Organization
//!
//! - [`types`] - The spec sum type and the extractor trait
//! - [`evaluator`] - The recursive evaluation algorithm
//! - [`builder`] - Checked construction of object specs
//! - [`built_in`] - Rename, split, mask and nullable extractors
//! - [`loader`] - Specs from their JSON/YAML document form
//!
//! # Examples
//!
//! ## Projection
//!
//! ```
//! use reshape_core::transform::{transform, TransformSpec};
//! use serde_json::json;
//!
//! let spec = TransformSpec::list(["id", "user.name"]);
//! let result = transform(&spec, &json!({"id": 7, "user": {"name": "ada"}}), false).unwrap();
//!
//! assert_eq!(result["id"], json!(7));
//! assert_eq!(result["user.name"], json!("ada"));
//! ```
//!
//! ## Redaction
//!
//! ```
//! use reshape_core::transform::{built_in, transform, TransformSpec};
//! use serde_json::json;
//!
//! let spec = TransformSpec::list(vec![
//!     TransformSpec::field("id"),
//!     built_in::mask("token", r"^(\w{3})\w+$", r"\1***").unwrap(),
//! ]);
//! let result = transform(&spec, &json!({"id": 1, "token": "abcdefgh"}), false).unwrap();
//!
//! assert_eq!(result["token"], json!("abc***"));
//! ```
//!
//! ## From configuration
//!
//! ```
//! use reshape_core::transform::{transform, TransformSpec};
//! use serde_json::json;
//!
//! let spec: TransformSpec = serde_json::from_value(json!({"a.b": "c"})).unwrap();
//! let result = transform(&spec, &json!({"a": {"b": {"c": 5}}}), false).unwrap();
//!
//! assert_eq!(result["c"], json!(5));
//! ```
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

// Core types
pub mod types;

// Evaluation
pub mod evaluator;

// Spec builder API
pub mod builder;

// Pre-configured extractors
pub mod built_in;

// Document form
pub mod loader;


pub use builder::ObjectSpecBuilder;
pub use evaluator::transform;
pub use types::{Extractor, SpecStats, TransformSpec};
