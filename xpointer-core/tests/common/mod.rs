//! Test infrastructure for XPointer resolution
//!
//! Provides fixture loading, an XML-driven event harness, and failure reporting.

#![allow(dead_code)]

mod harness;
mod loader;

pub use harness::{run_case, trace_xml, CaseResult, IdAttributes, Step};
pub use loader::{load_fixtures_by_name, TestCase};
