//! cityfinder-cli
//! ==============
//!
//! Command-line interface for the `cityfinder-core` prefix search.
//!
//! This crate primarily provides a binary (`cityfinder`). The library target
//! exists so docs.rs renders this overview. See the README for full usage.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cityfinder --help
//! cityfinder stats
//! cityfinder search "san f"
//! cityfinder --fold ascii search lodz
//! cityfinder build data/cities.bin.gz
//! ```
//!
//! For programmatic access use the [`cityfinder-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
