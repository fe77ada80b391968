//! Deterministic water potability scoring.
//!
//! The crate turns a fixed set of numeric water-quality measurements into a
//! 0-100 quality score, a potability verdict, and an ordered list of
//! human-readable risk factors. All decision logic is table-driven: a scoring
//! profile pairs a declarative parameter-rule table with one of two
//! aggregation policies, so retuning a threshold or adding a parameter is a
//! configuration change rather than a code change.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
