//! Call-site scanning for C source trees.
//!
//! Files are discovered by [`TreeScanner`], each file's text goes through
//! the declaration and call extractors, the per-file results are folded
//! into a [`TreeModel`], and [`classify`] splits the calls into internal
//! and external ones.

mod calls;
mod classify;
mod declarations;
mod files;
mod patterns;
mod runner;
mod types;

pub use calls::extract_calls;
pub use classify::{classify, FileScan, TreeModel};
pub use declarations::extract_declarations;
pub use files::{TreeScanner, DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS};
pub use patterns::{
    is_type_operator, Invocation, KeywordFilter, Nested, ParenIndex, DEFAULT_EXCLUDED_KEYWORDS,
    TYPE_OPERATORS,
};
pub use runner::Runner;
pub use types::{
    CallEntry, CallLocation, CallRecord, ClassifiedReport, DeclarationSet, ScanError, SourceFile,
};
