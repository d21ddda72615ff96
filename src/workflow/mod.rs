//! Scan workflow.
//!
//! [`ScanWorkflow`] sequences the backend calls of one scan and reports each
//! state it enters. [`ScanGate`] keeps scans single-flight: callers take a
//! [`ScanPermit`] before running one and a second attempt is ignored while
//! the permit is held.

mod gate;
mod scan;

pub use gate::{ScanGate, ScanPermit};
pub use scan::{ScanFailure, ScanOutcome, ScanReport, ScanState, ScanWorkflow};
