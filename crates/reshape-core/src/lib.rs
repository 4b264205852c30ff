//! Reshape Core - declarative extraction and reshaping of nested records
//!
//! This crate evaluates a transformation specification against a nested,
//! semi-structured record and produces a flat, ordered map holding exactly
//! the requested data.
//!
//! # Main Components
//!
//! - **Evaluator**: the recursive [`transform`] over four spec shapes
//! - **Path Resolver**: dotted paths such as `"a.b.c"` against nested mappings
//! - **Extractors**: rename, split, mask and nullable overrides, plus custom
//!   steps through the [`Extractor`] trait
//! - **Error Handling**: a closed taxonomy built with `thiserror`
//!
//! # Example
//!
//! ```
//! use reshape_core::{transform, Result, TransformSpec};
//! use reshape_core::transform::built_in;
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let spec = TransformSpec::list(vec![
//!         TransformSpec::field("id"),
//!         built_in::rename("meta.author", "author"),
//!         built_in::nullable("nickname", true),
//!     ]);
//!
//!     let record = json!({"id": 3, "meta": {"author": "grace"}});
//!     let result = transform(&spec, &record, false)?;
//!
//!     assert_eq!(serde_json::Value::Object(result), json!({
//!         "id": 3,
//!         "author": "grace",
//!         "nickname": null,
//!     }));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod path;
pub mod transform;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, ErrorKind, Result, Shape};
pub use transform::{transform, Extractor, ObjectSpecBuilder, SpecStats, TransformSpec};

/// Ordered output of an evaluation: destination key to extracted value
pub type ResultMap = serde_json::Map<String, serde_json::Value>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
