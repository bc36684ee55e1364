//! Founder Compass - founder diagnostic questionnaire and clarity report.
//!
//! This crate sequences a fixed diagnostic questionnaire, hands the answers to
//! a backend analysis service, and renders the returned analysis into a
//! one-page report that can be downloaded or emailed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
