//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (references, errors, state machines)
//! - `catalog` - The ordered question catalog
//! - `lead` - Lead registration and company size bands
//! - `diagnostic` - Answer store and the session state machine
//! - `analysis` - Analysis results and their placeholder policy
//! - `report` - Report layout: AnalysisResult to ReportDocument

pub mod analysis;
pub mod catalog;
pub mod diagnostic;
pub mod foundation;
pub mod lead;
pub mod report;
