//! Callmap - call-site mapper for C source trees.
//!
//! Callmap discovers every function defined in a C tree, finds every call
//! statement in every file, and classifies each call as internal (some file
//! in the tree defines a function of that name) or external (libc, other
//! libraries, macros). The report lists every `file: line` location per
//! called name, plus totals.
//!
//! This is a heuristic, not a C parser: there is no preprocessing, and
//! comments and string literals are scanned like code.
//!
//! # Architecture
//!
//! - `scan`: tree discovery, declaration and call extraction, classification
//! - `config`: optional YAML configuration
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line surface and logging setup

pub mod cli;
pub mod config;
pub mod report;
pub mod scan;

pub use config::{Config, ConfigError};
pub use scan::{
    classify, CallEntry, CallLocation, CallRecord, ClassifiedReport, DeclarationSet, Runner,
    ScanError, SourceFile, TreeModel,
};
