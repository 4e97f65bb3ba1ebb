//! # Runmark
//!
//! Runmark renders API-test run reports as Markdown documents. It consumes
//! the structured reports an upstream test runner produces — per-iteration
//! summaries plus every executed request with its assertion and test
//! outcomes — and streams a single document with a summary table and
//! collapsible per-request detail sections to any writable sink.
//!
//! ## Architecture (block diagram)
//!
//! ```text
//! +---------------------+      +----------------------+      +---------------------+
//! | run reports (JSON)  | ---> | reporter             | ---> | writer              |
//! | summary + results   |      | totals, iteration &  |      | headings, tables,   |
//! | per iteration       |      | request details      |      | quotes, fences,     |
//! +---------------------+      +----------------------+      | <details> sections  |
//!                                                            +---------------------+
//!                                                                      |
//!                                                                      v
//!                                                            +---------------------+
//!                                                            | io::Write sink      |
//!                                                            | (file, buffer, ...) |
//!                                                            +---------------------+
//! ```
//!
//! The writer appends eagerly, so arbitrarily large reports stream to disk
//! without the document ever being buffered in memory. Whitespace placement
//! is exact: downstream tooling compares rendered documents byte-for-byte.
//!
//! ## Usage
//!
//! ```
//! use indexmap::IndexMap;
//! use runmark::{render_to, RunReport};
//!
//! let reports: Vec<RunReport> = vec![RunReport::default()];
//! let mut buf = Vec::new();
//! render_to(&mut buf, &reports, &IndexMap::new())?;
//! # Ok::<(), runmark::Error>(())
//! ```
//!
//! For file output use [`render_to_file`], which owns the file handle for the
//! duration of the render and releases it on every exit path.

pub mod error;
pub mod report;
pub mod reporter;
pub mod writer;

pub use error::{Error, Result};
pub use report::{
    AssertionResult, RequestInfo, RequestResult, ResponseInfo, ResultStates, RunReport, Status,
    Summary, TestFile, TestResult,
};
pub use reporter::{render_to, render_to_file};
pub use writer::MdWriter;
