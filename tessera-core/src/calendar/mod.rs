//! Calendar utilities shared by connectors and orchestrator.
//!
//! Modules include:
//! - `merge`: fold secondary per-day counts into a classified primary history
//! - `grid`: project a history into Sunday-anchored week columns
//! - `labels`: month labels aligned to grid columns
//! - `aggregate`: yearly totals and per-year graph assembly
/// Yearly totals and assembly of per-year graph data.
pub mod aggregate;
/// Week-by-day grid projection.
pub mod grid;
/// Month-change labels for grid columns.
pub mod labels;
/// Merge utilities for joining a classified history with raw counts.
pub mod merge;
/// Date parsing and naming helpers.
pub mod util;
